use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::error::AppError;
use crate::models::destination::DestinationInput;
use crate::routes::parse_id;

/// Destination management. Mounted under `/api/admin` behind the auth and
/// admin-role middleware.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/destinations", web::post().to(create_destination))
        .route("/destinations/{id}", web::put().to(update_destination))
        .route("/destinations/{id}", web::delete().to(delete_destination));
}

/*
    POST /api/admin/destinations
*/
pub async fn create_destination(
    data: web::Data<AppState>,
    input: web::Json<DestinationInput>,
) -> Result<HttpResponse, AppError> {
    let destination = data.destinations.create(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(destination))
}

/*
    PUT /api/admin/destinations/{id}
*/
pub async fn update_destination(
    data: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<DestinationInput>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let destination = data.destinations.update(id, input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(destination))
}

/*
    DELETE /api/admin/destinations/{id}
*/
pub async fn delete_destination(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    data.destinations.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
