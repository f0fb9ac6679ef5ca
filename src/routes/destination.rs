use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::AppError;
use crate::models::{
    ai::{AiResult, TravelTips},
    destination::Destination,
    weather::WeatherReport,
};
use crate::routes::parse_id;

#[derive(Deserialize)]
pub struct QueryParams {
    limit: Option<u16>,
    search: Option<String>,
}

#[derive(Serialize)]
struct DestinationDetail {
    destination: Destination,
    weather: WeatherReport,
    weather_icon_url: String,
}

#[derive(Serialize)]
struct DestinationInsights {
    destination: Destination,
    ai_tips: AiResult<TravelTips>,
}

/*
    /api/destinations?search=&limit=
*/
pub async fn list(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> Result<HttpResponse, AppError> {
    let search = params.search.as_deref().map(str::trim);
    let destinations = data.destinations.list(search, params.limit).await?;
    Ok(HttpResponse::Ok().json(destinations))
}

/*
    /api/destinations/{id}
*/
pub async fn detail(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let destination = data.destinations.get(id).await?;

    let weather = data.weather.current_weather(&destination.name).await;
    let weather_icon_url = weather.icon_url();

    Ok(HttpResponse::Ok().json(DestinationDetail {
        destination,
        weather,
        weather_icon_url,
    }))
}

/*
    /api/destinations/{id}/insights
*/
pub async fn insights(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let destination = data.destinations.get(id).await?;

    let ai_tips = data
        .assistant
        .travel_tips(&destination.name, destination.best_season.as_str())
        .await;

    Ok(HttpResponse::Ok().json(DestinationInsights {
        destination,
        ai_tips,
    }))
}
