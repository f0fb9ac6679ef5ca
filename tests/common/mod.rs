#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App,
};
use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use travel_planner_api::{
    app::{self, AppState},
    config::{AiConfig, WeatherConfig},
    db::memory::MemoryStore,
    middleware::auth::{AuthMiddleware, Claims},
    services::{
        ai_assistant_service::{AiError, ChatCompletion, ChatRequest, TravelAssistant},
        weather_service::WeatherClient,
    },
};

pub const TEST_SECRET: &str = "test_secret";

/// Chat backend that answers every request with a fixed reply, or fails, and
/// keeps the requests it saw.
#[derive(Default)]
pub struct StubChat {
    pub fail: bool,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl StubChat {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubChat {
    async fn complete(&self, request: ChatRequest) -> Result<String, AiError> {
        let max_tokens = request.max_tokens;
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(AiError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            });
        }
        Ok(format!("stub reply ({} tokens)", max_tokens))
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub chat: Arc<StubChat>,
    pub state: web::Data<AppState>,
    pub auth: AuthMiddleware,
}

impl TestApp {
    /// Memory store, unconfigured weather, configured stub assistant.
    pub fn new() -> Self {
        Self::build(
            WeatherConfig::new(None, "http://127.0.0.1:9/unused"),
            Arc::new(StubChat::default()),
            Some("test-groq-key".to_string()),
        )
    }

    pub fn with_weather(weather: WeatherConfig) -> Self {
        Self::build(
            weather,
            Arc::new(StubChat::default()),
            Some("test-groq-key".to_string()),
        )
    }

    pub fn with_chat(chat: StubChat, api_key: Option<String>) -> Self {
        Self::build(
            WeatherConfig::new(None, "http://127.0.0.1:9/unused"),
            Arc::new(chat),
            api_key,
        )
    }

    fn build(weather: WeatherConfig, chat: Arc<StubChat>, api_key: Option<String>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let weather = WeatherClient::new(&weather).unwrap();
        let ai_config = AiConfig::new(api_key, "http://127.0.0.1:9/unused");
        let assistant = TravelAssistant::new(chat.clone(), &ai_config);

        Self {
            state: web::Data::new(AppState::new(store.clone(), weather, assistant)),
            store,
            chat,
            auth: AuthMiddleware::new(TEST_SECRET),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let auth = self.auth.clone();
        App::new()
            .app_data(self.state.clone())
            .configure(move |cfg| app::configure(cfg, &auth))
    }
}

pub fn token_for(user_id: &str, role: Option<&str>) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: format!("{}@example.com", user_id),
        exp: now + 3600,
        iat: now,
        user_id: user_id.to_string(),
        role: role.map(str::to_string),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id, None)))
}

pub fn admin_bearer() -> (&'static str, String) {
    (
        "Authorization",
        format!("Bearer {}", token_for("admin-1", Some("admin"))),
    )
}

/// Calls the service, turning middleware errors into their HTTP status.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            let body = test::read_body(resp).await;
            let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            (status, value)
        }
        Err(err) => (err.as_response_error().status_code(), Value::Null),
    }
}

/// Hex string of a Mongo `_id` as it appears in JSON.
pub fn id_of(value: &Value) -> String {
    value["_id"]["$oid"].as_str().unwrap().to_string()
}

pub fn paris() -> Value {
    json!({
        "name": "Paris",
        "country": "France",
        "description": "City of lights",
        "avg_budget": 2000,
        "best_season": "Spring"
    })
}
