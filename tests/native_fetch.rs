#![cfg(feature = "native")]

use directory_engine::config::DirectoryConfig;
use directory_engine::error::DirectoryError;
use directory_engine::fetch::fetch_doctors;
use directory_engine::types::{ConsultationType, FilterState};
use directory_engine::DirectoryEngine;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BODY: &str = r#"[
    {"id": "1", "name": "Dr. Video Only", "specialities": [{"name": "Dentist"}],
     "experience": "3 Years of experience", "fees": "₹ 400",
     "video_consult": true, "in_clinic": false},
    {"id": "2", "name": "Dr. Both Modes", "specialities": [{"name": "Dentist"}],
     "experience": "9 Years of experience", "fees": "₹ 800",
     "video_consult": true, "in_clinic": true}
]"#;

async fn serve(template: ResponseTemplate) -> (MockServer, String) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors.json"))
        .respond_with(template)
        .mount(&server)
        .await;
    let url = format!("{}/doctors.json", server.uri());
    (server, url)
}

// The blocking client must not run on the async runtime's worker threads
async fn fetch(url: String) -> Result<Vec<directory_engine::types::Doctor>, DirectoryError> {
    tokio::task::spawn_blocking(move || fetch_doctors(&url))
        .await
        .expect("fetch task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_and_filter_end_to_end() {
    let (_server, url) = serve(ResponseTemplate::new(200).set_body_string(BODY)).await;

    let doctors = fetch(url).await.expect("fetch should succeed");
    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[1].consultation_type, ConsultationType::Both);

    let engine = DirectoryEngine::new(
        doctors,
        FilterState::from_query("consultation=Video+Consult"),
        DirectoryConfig::default(),
    );
    let ids: Vec<&str> = engine.results().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_is_reported() {
    let (_server, url) = serve(ResponseTemplate::new(503)).await;
    let result = fetch(url).await;
    assert!(matches!(result, Err(DirectoryError::Status(503))));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_a_parse_error() {
    let (_server, url) = serve(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;
    let result = fetch(url).await;
    assert!(matches!(result, Err(DirectoryError::Parse(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_endpoint_is_a_fetch_error() {
    // Nothing listens on a port once its listener is dropped
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind a free port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    let url = format!("http://127.0.0.1:{}/doctors.json", port);

    let result = fetch(url).await;
    assert!(matches!(result, Err(DirectoryError::Fetch(_))));
}
