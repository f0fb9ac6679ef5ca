use std::process::ExitCode;

use env_logger::Env;

use travel_planner_api::{
    config::AppConfig,
    db::{mongo, seed},
};

#[tokio::main]
async fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match mongo::create_mongo_client(&config.mongodb_uri).await {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create MongoDB client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = mongo::MongoStore::new(&client, &config.database);
    if let Err(e) = store.ensure_indexes().await {
        log::error!("Failed to create indexes: {}", e);
        return ExitCode::FAILURE;
    }

    match seed::populate(&store).await {
        Ok(created) => {
            log::info!("Successfully populated {} destinations", created);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to populate destinations: {}", e);
            ExitCode::FAILURE
        }
    }
}
