use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::error::AppError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::itinerary::ItineraryInput;
use crate::routes::parse_id;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/itineraries", web::get().to(list))
        .route("/itineraries", web::post().to(create))
        .route("/itineraries/{id}", web::get().to(get_by_id))
        .route("/itineraries/{id}", web::put().to(update))
        .route("/itineraries/{id}", web::delete().to(delete));
}

/*
    GET /api/itineraries
*/
pub async fn list(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let itineraries = data.itineraries.list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(itineraries))
}

/*
    POST /api/itineraries
*/
pub async fn create(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    input: web::Json<ItineraryInput>,
) -> Result<HttpResponse, AppError> {
    let itinerary = data
        .itineraries
        .create(&user.user_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(itinerary))
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let detail = data.itineraries.detail(&user.user_id, id).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/*
    PUT /api/itineraries/{id}
*/
pub async fn update(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<ItineraryInput>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let itinerary = data
        .itineraries
        .update(&user.user_id, id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn delete(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    data.itineraries.delete(&user.user_id, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
