use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::db::{DayPlanRepository, DestinationRepository, ItineraryRepository, StoreHealth};
use crate::error::AppError;
use crate::middleware::{
    auth::AuthMiddleware,
    role_auth::{RequireRole, UserRole},
};
use crate::routes;
use crate::services::{
    ai_assistant_service::TravelAssistant, destination_service::DestinationService,
    itinerary_service::ItineraryService, weather_service::WeatherClient,
};

/// Shared request state handed to every handler through `web::Data`.
pub struct AppState {
    pub destinations: DestinationService,
    pub itineraries: ItineraryService,
    pub weather: WeatherClient,
    pub assistant: TravelAssistant,
    pub store: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, weather: WeatherClient, assistant: TravelAssistant) -> Self
    where
        S: DestinationRepository + ItineraryRepository + DayPlanRepository + StoreHealth + 'static,
    {
        let destinations: Arc<dyn DestinationRepository> = store.clone();
        let itineraries: Arc<dyn ItineraryRepository> = store.clone();
        let day_plans: Arc<dyn DayPlanRepository> = store.clone();

        Self {
            destinations: DestinationService::new(destinations.clone()),
            itineraries: ItineraryService::new(destinations, itineraries, day_plans),
            weather,
            assistant,
            store,
        }
    }
}

/// Registers every route. Public routes come first so the unprefixed
/// authenticated scope only sees what is left.
pub fn configure(cfg: &mut web::ServiceConfig, auth: &AuthMiddleware) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(|err, _| {
            log::debug!("Rejected query string: {}", err);
            AppError::Validation("Invalid query parameters.".to_string()).into()
        }))
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .route("/destinations", web::get().to(routes::destination::list))
                .route("/destinations/{id}", web::get().to(routes::destination::detail))
                .route(
                    "/destinations/{id}/insights",
                    web::get().to(routes::destination::insights),
                )
                .route("/weather", web::get().to(routes::weather::current))
                .route("/ai/status", web::get().to(routes::ai::status))
                .route("/ai/assistant", web::post().to(routes::ai::assistant))
                .route(
                    "/ai/enhance-description",
                    web::post().to(routes::ai::enhance_description),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RequireRole::new(UserRole::Admin))
                        .wrap(auth.clone())
                        .configure(routes::admin::config),
                )
                .service(
                    web::scope("")
                        .wrap(auth.clone())
                        .route("/ai/planner", web::post().to(routes::ai::planner))
                        .configure(routes::itinerary::config)
                        .configure(routes::day_plan::config),
                ),
        );
}

/// Malformed bodies get the same `{"error": ...}` shape as other validation
/// failures, without the deserializer's wording.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body: {}", err);
    let message = match err {
        JsonPayloadError::Deserialize(_) => "Request body has a missing or invalid field.",
        JsonPayloadError::ContentType => "Expected a JSON request body.",
        _ => "Request body is not valid JSON.",
    };
    AppError::Validation(message.to_string()).into()
}
