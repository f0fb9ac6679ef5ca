use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::app::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details.into()),
        }
    }

    fn error(details: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details.into()),
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let mut services = HashMap::new();

    let store = check_store(&data).await;
    services.insert(data.store.backend().to_string(), store);

    let weather = if data.weather.is_configured() {
        ServiceStatus::ok("OpenWeather API key configured")
    } else {
        ServiceStatus::error("OPENWEATHER_API_KEY not configured")
    };
    services.insert("weather".to_string(), weather);

    let ai_status = data.assistant.status();
    let ai = if ai_status.available {
        ServiceStatus::ok(ai_status.message)
    } else {
        ServiceStatus::error(ai_status.message)
    };
    services.insert("ai".to_string(), ai);

    let status = if services.values().all(ServiceStatus::is_ok) {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn check_store(data: &AppState) -> ServiceStatus {
    match data.store.ping().await {
        Ok(()) => ServiceStatus::ok(format!("Connected to {}", data.store.backend())),
        Err(e) => {
            log::error!("Store health check failed: {}", e);
            ServiceStatus::error(format!("Failed to connect: {}", e))
        }
    }
}
