use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travel_planner_api::{
    app::{self, AppState},
    config::AppConfig,
    db::{mongo, StoreHealth},
    middleware::auth::AuthMiddleware,
    services::{ai_assistant_service::TravelAssistant, weather_service::WeatherClient},
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;

    let client = mongo::create_mongo_client(&config.mongodb_uri)
        .await
        .map_err(|e| {
            log::error!("Failed to create MongoDB client: {}", e);
            io::Error::other(e)
        })?;

    let store = Arc::new(mongo::MongoStore::new(&client, &config.database));
    if let Err(e) = store.ping().await {
        log::error!("MongoDB ping failed: {}", e);
        return Err(io::Error::other(e));
    }
    log::info!("MongoDB connection established");

    store.ensure_indexes().await.map_err(|e| {
        log::error!("Failed to create indexes: {}", e);
        io::Error::other(e)
    })?;

    let weather = WeatherClient::new(&config.weather).map_err(io::Error::other)?;
    if !weather.is_configured() {
        log::warn!("OPENWEATHER_API_KEY not set, weather reports will be unavailable");
    }

    let assistant = TravelAssistant::from_config(&config.ai).map_err(io::Error::other)?;
    if !assistant.status().available {
        log::warn!("GROQ_API_KEY not set, AI features will report errors");
    }

    let state = web::Data::new(AppState::new(store, weather, assistant));
    let auth = AuthMiddleware::new(&config.jwt_secret);

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(|cfg| app::configure(cfg, &auth))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
