//! Tests for the HTTP busy-interval query against a mock availability service.

use std::time::Duration;

use booking_page::{BookingPage, BusyQuery, BusyQueryError, DayState, HttpBusyQuery, PageConfig};
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use serde_json::json;
use slot_engine::{DateService, DayRange, FixedClock};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn march_2() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn client(server: &MockServer) -> HttpBusyQuery {
    HttpBusyQuery::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_busy_intervals_for_day_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/availability/alice"))
        .and(query_param("dateFrom", "2026-03-02T05:00:00Z"))
        .and(query_param("dateTo", "2026-03-03T04:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primary": {
                "busy": [
                    { "start": "2026-03-02T15:00:00Z", "end": "2026-03-02T16:00:00Z" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let range = DayRange::for_date(march_2(), New_York).unwrap();
    let busy = client(&server).busy("alice", range).await.unwrap();

    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].start, Utc.with_ymd_and_hms(2026, 3, 2, 15, 0, 0).unwrap());
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/availability/alice"))
        .respond_with(ResponseTemplate::new(500).set_body_string("calendar offline"))
        .mount(&server)
        .await;

    let range = DayRange::for_date(march_2(), New_York).unwrap();
    let err = client(&server).busy("alice", range).await.unwrap_err();

    match err {
        BusyQueryError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "calendar offline");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"busy\": []}"))
        .mount(&server)
        .await;

    let range = DayRange::for_date(march_2(), New_York).unwrap();
    let err = client(&server).busy("alice", range).await.unwrap_err();
    assert!(matches!(err, BusyQueryError::Parse(_)));
}

#[tokio::test]
async fn username_is_escaped_in_request_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/availability/a%3Fb"))
        .and(query_param("dateFrom", "2026-03-02T05:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primary": { "busy": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let range = DayRange::for_date(march_2(), New_York).unwrap();
    let busy = client(&server).busy("a?b", range).await.unwrap();
    assert!(busy.is_empty());
}

#[tokio::test]
async fn closed_port_is_an_http_error() {
    let base_url = closed_port_url();
    let query = HttpBusyQuery::new(base_url, Duration::from_secs(5)).unwrap();

    let range = DayRange::for_date(march_2(), New_York).unwrap();
    let err = query.busy("alice", range).await.unwrap_err();
    assert!(matches!(err, BusyQueryError::Http(_)));
}

// ── Page over HTTP ──────────────────────────────────────────────────────────

/// A local URL nothing is listening on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn page_config(api_base: &str) -> PageConfig {
    PageConfig::from_toml(&format!(
        r#"
        [api]
        base_url = "{}"
        timeout_secs = 5

        [site]
        base_url = "https://book.example.com"

        [viewer]
        time_zone = "America/New_York"

        [[hosts]]
        username = "alice"
        timeZone = "America/New_York"
        startTime = 540
        endTime = 1020

        [[event_types]]
        id = 1
        title = "Intro call"
        length = 30
        "#,
        api_base
    ))
    .unwrap()
}

async fn show_march_2(config: &PageConfig) -> DayState {
    let dates = DateService::new(
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
        config.viewer_zone().unwrap(),
    );
    let mut page = BookingPage::load(&config.profiles(), "alice", 1, dates, &config.site.base_url)
        .await
        .unwrap();
    let query = HttpBusyQuery::from_config(&config.api).unwrap();

    page.show_day(march_2(), &query).await.unwrap().clone()
}

#[tokio::test]
async fn page_fails_day_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let state = show_march_2(&page_config(&server.uri())).await;
    assert!(matches!(state, DayState::Failed { .. }));
}

#[tokio::test]
async fn page_fails_day_when_service_is_unreachable() {
    let state = show_march_2(&page_config(&closed_port_url())).await;
    assert!(matches!(state, DayState::Failed { .. }));
}
