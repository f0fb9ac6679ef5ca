use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct WeatherQuery {
    city: Option<String>,
}

/*
    /api/weather?city=
*/
pub async fn current(
    data: web::Data<AppState>,
    params: web::Query<WeatherQuery>,
) -> Result<HttpResponse, AppError> {
    let city = params.city.as_deref().map(str::trim).unwrap_or_default();
    if city.is_empty() {
        return Err(AppError::Validation("A city name is required.".to_string()));
    }

    let report = data.weather.current_weather(city).await;
    Ok(HttpResponse::Ok().json(report))
}
