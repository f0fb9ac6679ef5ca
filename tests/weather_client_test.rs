mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, test, web, App, HttpResponse, HttpServer};
use serde_json::json;
use serial_test::serial;

use travel_planner_api::{
    config::WeatherConfig,
    models::weather::{WeatherFailure, WeatherReport},
    services::weather_service::WeatherClient,
};

use common::{send, TestApp};

const API_KEY: &str = "weather-test-key";

struct FakeOpenWeather {
    url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeOpenWeather {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn config(&self, api_key: Option<&str>) -> WeatherConfig {
        WeatherConfig::new(api_key.map(str::to_string), self.url.clone())
            .with_timeout(Duration::from_millis(500))
    }
}

async fn current_weather(
    hits: web::Data<AtomicUsize>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);

    if query.get("appid").map(String::as_str) != Some(API_KEY) {
        return HttpResponse::Unauthorized().json(json!({"cod": 401}));
    }
    if query.get("units").map(String::as_str) != Some("metric") {
        return HttpResponse::BadRequest().finish();
    }

    match query.get("q").map(String::as_str) {
        Some("Paris") => HttpResponse::Ok().json(json!({
            "main": {
                "temp": 18.5,
                "temp_min": 16.5,
                "temp_max": 21.5,
                "feels_like": 17.49,
                "humidity": 72,
                "pressure": 1012
            },
            "weather": [{"description": "LIGHT rain", "icon": "10d"}],
            "wind": {"speed": 4.1},
            "name": "Paris",
            "sys": {"country": "FR"}
        })),
        Some("Garbled") => HttpResponse::Ok().json(json!({"unexpected": true})),
        Some("Broken") => HttpResponse::ServiceUnavailable().finish(),
        Some("Slow") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            HttpResponse::Ok().finish()
        }
        _ => HttpResponse::NotFound().json(json!({"cod": "404"})),
    }
}

fn spawn_fake_openweather() -> FakeOpenWeather {
    let hits = Arc::new(AtomicUsize::new(0));
    let data = web::Data::from(hits.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/data/2.5/weather", web::get().to(current_weather))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    FakeOpenWeather {
        url: format!("http://{}/data/2.5/weather", addr),
        hits,
    }
}

#[actix_rt::test]
#[serial]
async fn test_current_weather_is_normalized() {
    let fake = spawn_fake_openweather();
    let client = WeatherClient::new(&fake.config(Some(API_KEY))).unwrap();

    let report = client.current_weather("Paris").await;
    let WeatherReport::Current(current) = report else {
        panic!("expected current weather, got {:?}", report);
    };

    assert_eq!(current.temp, 18);
    assert_eq!(current.temp_min, 16);
    assert_eq!(current.temp_max, 22);
    assert_eq!(current.feels_like, 17);
    assert_eq!(current.humidity, 72);
    assert_eq!(current.pressure, 1012);
    assert_eq!(current.description, "Light rain");
    assert_eq!(current.icon, "10d");
    assert_eq!(current.wind_speed, 4.1);
    assert_eq!(current.city, "Paris");
    assert_eq!(current.country, "FR");
    assert_eq!(fake.hits(), 1);
}

#[actix_rt::test]
#[serial]
async fn test_failures_become_placeholder_reports() {
    let fake = spawn_fake_openweather();
    let client = WeatherClient::new(&fake.config(Some(API_KEY))).unwrap();

    assert_eq!(
        client.current_weather("Atlantis").await,
        WeatherReport::Unavailable(WeatherFailure::CityNotFound {
            city: "Atlantis".to_string()
        })
    );
    assert_eq!(
        client.current_weather("Broken").await,
        WeatherReport::Unavailable(WeatherFailure::Status(503))
    );
    assert_eq!(
        client.current_weather("Slow").await,
        WeatherReport::Unavailable(WeatherFailure::Timeout)
    );
    assert!(matches!(
        client.current_weather("Garbled").await,
        WeatherReport::Unavailable(WeatherFailure::Unexpected(_))
    ));

    let bad_key = WeatherClient::new(&fake.config(Some("wrong"))).unwrap();
    assert_eq!(
        bad_key.current_weather("Paris").await,
        WeatherReport::Unavailable(WeatherFailure::InvalidCredential)
    );
}

#[actix_rt::test]
#[serial]
async fn test_missing_key_makes_no_request() {
    let fake = spawn_fake_openweather();
    let client = WeatherClient::new(&fake.config(None)).unwrap();

    let report = client.current_weather("Paris").await;

    assert_eq!(report, WeatherReport::Unavailable(WeatherFailure::NotConfigured));
    assert_eq!(fake.hits(), 0);
}

#[actix_rt::test]
#[serial]
async fn test_unreachable_service_is_connection_error() {
    let config = WeatherConfig::new(Some(API_KEY.to_string()), "http://127.0.0.1:9/weather")
        .with_timeout(Duration::from_millis(500));
    let client = WeatherClient::new(&config).unwrap();

    let report = client.current_weather("Paris").await;
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["error"], true);
    assert_eq!(value["icon"], "01d");
    assert!(value["message"]
        .as_str()
        .unwrap()
        .starts_with("Error fetching weather data"));
}

#[actix_rt::test]
#[serial]
async fn test_weather_route() {
    let fake = spawn_fake_openweather();
    let test_app = TestApp::with_weather(fake.config(Some(API_KEY)));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?city=Paris")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], false);
    assert_eq!(body["temp"], 18);
    assert_eq!(body["city"], "Paris");

    let req = test::TestRequest::get()
        .uri("/api/weather?city=Atlantis")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], true);
    assert_eq!(
        body["message"],
        "City \"Atlantis\" not found in weather database."
    );

    let req = test::TestRequest::get().uri("/api/weather").to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
