mod common;

use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use serial_test::serial;
use tokio_test::{assert_err, assert_ok};

use travel_planner_api::{
    config::AiConfig,
    services::ai_assistant_service::{
        AiError, ChatCompletion, ChatMessage, ChatRequest, GroqChatClient,
    },
};

use common::{bearer, send, StubChat, TestApp};

#[actix_rt::test]
#[serial]
async fn test_status_reports_configuration() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/ai/status").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(body["models"], json!(["llama-3.3-70b-versatile"]));

    let test_app = TestApp::with_chat(StubChat::default(), None);
    let app = test::init_service(test_app.create_app()).await;
    let req = test::TestRequest::get().uri("/api/ai/status").to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["available"], false);
    assert_eq!(body["message"], "Groq API key not configured");
}

#[actix_rt::test]
#[serial]
async fn test_assistant_recommends_and_answers() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/assistant")
        .set_json(json!({"query": "  quiet beaches in Asia  "}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "quiet beaches in Asia");
    assert_eq!(body["recommendations"], "stub reply (1024 tokens)");

    let req = test::TestRequest::post()
        .uri("/api/ai/assistant")
        .set_json(json!({"query": "Do I need a visa?", "action": "question", "context": "Bali"}))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["question"], "Do I need a visa?");
    assert!(body["answer"].is_string());

    let prompt = &test_app.chat.seen()[1].messages[0].content;
    assert!(prompt.contains("Context: Bali"));
}

#[actix_rt::test]
#[serial]
async fn test_assistant_rejects_empty_query() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/assistant")
        .set_json(json!({"query": "   "}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter your travel query.");
    assert!(test_app.chat.seen().is_empty());
}

#[actix_rt::test]
#[serial]
async fn test_backend_failure_is_tagged_result() {
    let test_app = TestApp::with_chat(StubChat::failing(), Some("key".to_string()));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/enhance-description")
        .set_json(json!({"destination_name": "Goa", "description": "Beaches"}))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["enhanced_description"].is_null());
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("AI service error:"));
}

#[actix_rt::test]
#[serial]
async fn test_planner_requires_login_and_complete_form() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let form = json!({"destination": "Kyoto", "days": "3", "interests": "temples, food"});

    let req = test::TestRequest::post()
        .uri("/api/ai/planner")
        .set_json(&form)
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let cases = [
        (json!({"destination": "Kyoto", "days": "3"}), "Please fill in all fields."),
        (json!({"destination": "Kyoto", "days": "three", "interests": "food"}), "Please enter a valid number of days."),
        (json!({"destination": "Kyoto", "days": "0", "interests": "food"}), "Please enter a valid number of days."),
    ];
    for (payload, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/ai/planner")
            .insert_header(bearer("alice"))
            .set_json(payload)
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], message);
    }

    let req = test::TestRequest::post()
        .uri("/api/ai/planner")
        .insert_header(bearer("alice"))
        .set_json(&form)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["destination"], "Kyoto");
    assert_eq!(body["days"], 3);
    assert_eq!(body["itinerary"], "stub reply (2048 tokens)");
}

struct FakeGroq {
    url: String,
    received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions(
    req: HttpRequest,
    body: web::Json<Value>,
    received: web::Data<Mutex<Vec<(Option<String>, Value)>>>,
) -> HttpResponse {
    let auth = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    received.lock().unwrap().push((auth.clone(), body.into_inner()));

    if auth.as_deref() != Some("Bearer gsk_good") {
        return HttpResponse::Unauthorized().body("invalid api key");
    }
    HttpResponse::Ok().json(json!({
        "choices": [{"message": {"role": "assistant", "content": "Try Lisbon."}}]
    }))
}

fn spawn_fake_groq() -> FakeGroq {
    let received = Arc::new(Mutex::new(Vec::new()));
    let data = web::Data::from(received.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/openai/v1/chat/completions", web::post().to(chat_completions))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    FakeGroq {
        url: format!("http://{}/openai/v1/", addr),
        received,
    }
}

fn request(max_tokens: u32) -> ChatRequest {
    ChatRequest {
        model: "llama-3.3-70b-versatile".to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: "Where should I go in May?".to_string(),
        }],
        temperature: 0.7,
        max_tokens,
    }
}

#[actix_rt::test]
#[serial]
async fn test_groq_client_wire_format() {
    let fake = spawn_fake_groq();
    let config = AiConfig::new(Some("gsk_good".to_string()), fake.url.clone());
    let client = GroqChatClient::new(&config).unwrap();

    let text = assert_ok!(client.complete(request(512)).await);
    assert_eq!(text, "Try Lisbon.");

    let received = fake.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let (auth, body) = &received[0];
    assert_eq!(auth.as_deref(), Some("Bearer gsk_good"));
    assert_eq!(body["model"], "llama-3.3-70b-versatile");
    assert_eq!(body["max_tokens"], 512);
    assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Where should I go in May?");
}

#[actix_rt::test]
#[serial]
async fn test_groq_client_reports_api_errors() {
    let fake = spawn_fake_groq();
    let config = AiConfig::new(Some("gsk_bad".to_string()), fake.url.clone());
    let client = GroqChatClient::new(&config).unwrap();

    let err = assert_err!(client.complete(request(64)).await);
    match err {
        AiError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid api key");
        }
        other => panic!("unexpected error: {}", other),
    }
}
