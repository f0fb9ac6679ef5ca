use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::error::AppError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::day_plan::DayPlanInput;
use crate::routes::parse_id;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/itineraries/{id}/day-plans", web::post().to(create))
        .route("/itineraries/{id}/day-plans/next", web::get().to(next_day))
        .route("/day-plans/{id}", web::put().to(update))
        .route("/day-plans/{id}", web::delete().to(delete));
}

/*
    POST /api/itineraries/{id}/day-plans
*/
pub async fn create(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<DayPlanInput>,
) -> Result<HttpResponse, AppError> {
    let itinerary_id = parse_id(&path.into_inner())?;
    let day_plan = data
        .itineraries
        .add_day_plan(&user.user_id, itinerary_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(day_plan))
}

/*
    GET /api/itineraries/{id}/day-plans/next
*/
pub async fn next_day(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let itinerary_id = parse_id(&path.into_inner())?;
    let next = data.itineraries.next_day(&user.user_id, itinerary_id).await?;
    Ok(HttpResponse::Ok().json(next))
}

/*
    PUT /api/day-plans/{id}
*/
pub async fn update(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<DayPlanInput>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let day_plan = data
        .itineraries
        .update_day_plan(&user.user_id, id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(day_plan))
}

/*
    DELETE /api/day-plans/{id}
*/
pub async fn delete(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    data.itineraries.delete_day_plan(&user.user_id, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
