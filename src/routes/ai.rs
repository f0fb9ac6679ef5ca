use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::error::AppError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::ai::{AssistantAction, AssistantRequest, EnhanceRequest, PlannerRequest};

/*
    GET /api/ai/status
*/
pub async fn status(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.assistant.status())
}

/*
    POST /api/ai/assistant
*/
pub async fn assistant(
    data: web::Data<AppState>,
    input: web::Json<AssistantRequest>,
) -> Result<HttpResponse, AppError> {
    let query = input.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation(
            "Please enter your travel query.".to_string(),
        ));
    }

    let response = match input.action {
        AssistantAction::Recommend => {
            HttpResponse::Ok().json(data.assistant.recommend_destinations(query).await)
        }
        AssistantAction::Question => {
            let context = input
                .context
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty());
            HttpResponse::Ok().json(data.assistant.answer_question(query, context).await)
        }
    };

    Ok(response)
}

/*
    POST /api/ai/planner
*/
pub async fn planner(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    input: web::Json<PlannerRequest>,
) -> Result<HttpResponse, AppError> {
    let destination = input.destination.trim();
    let days = input.days.trim();
    let interests = input.interests.trim();

    if destination.is_empty() || days.is_empty() || interests.is_empty() {
        return Err(AppError::Validation("Please fill in all fields.".to_string()));
    }

    let days = days
        .parse::<u32>()
        .ok()
        .filter(|d| *d >= 1)
        .ok_or_else(|| AppError::Validation("Please enter a valid number of days.".to_string()))?;

    log::info!(
        "Generating {}-day itinerary draft for {} (user {})",
        days,
        destination,
        user.user_id
    );

    let draft = data
        .assistant
        .generate_itinerary(destination, days, interests)
        .await;
    Ok(HttpResponse::Ok().json(draft))
}

/*
    POST /api/ai/enhance-description
*/
pub async fn enhance_description(
    data: web::Data<AppState>,
    input: web::Json<EnhanceRequest>,
) -> Result<HttpResponse, AppError> {
    let name = input.destination_name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "A destination name is required.".to_string(),
        ));
    }

    let enhanced = data
        .assistant
        .enhance_description(name, input.description.trim())
        .await;
    Ok(HttpResponse::Ok().json(enhanced))
}
