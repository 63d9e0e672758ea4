//! End-to-end spec scenarios against in-memory applications.

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hypatia::{Harness, Request, Testable};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// An application with a single route at `/known`; everything else is 404.
fn single_route_app() -> Harness {
    Harness::new(|req: Request| async move {
        let (status, body) = if req.uri().path() == "/known" {
            (StatusCode::OK, "found")
        } else {
            (StatusCode::NOT_FOUND, "no such route")
        };
        http::Response::builder()
            .status(status)
            .header("content-type", "text/plain; charset=utf-8")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    })
}

/// An application that echoes the request body back as JSON.
fn json_echo_app() -> Harness {
    Harness::new(|req: Request| async move {
        let bytes = match req.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(never) => match never {},
        };
        http::Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json")
            .body(Full::new(bytes))
            .unwrap()
    })
}

#[tokio::test]
async fn missing_route_returns_404() {
    let app = single_route_app();
    app.spec("missing_route_returns_404")
        .get("foo")
        .expect_status(404)
        .run()
        .await;
}

#[tokio::test]
async fn missing_route_fails_a_200_expectation() {
    let app = single_route_app();
    let report = app
        .spec("missing_route_fails_200")
        .get("foo")
        .expect_status(200)
        .try_run()
        .await
        .unwrap();

    assert!(!report.is_pass());
    assert_eq!(report.failures()[0].message, "expected status 200, got 404");
}

#[tokio::test]
async fn hello_passes_content_length_five() {
    let app = Harness::text(200, "hello");
    app.spec("hello_content_length")
        .get("hello")
        .expect_status(200)
        .expect_header("Content-Length")
        .expect_header_values("Content-Length", ["5"])
        .run()
        .await;
}

#[tokio::test]
async fn hello_fails_content_length_four() {
    let app = Harness::text(200, "hello");
    let report = app
        .spec("hello_wrong_content_length")
        .get("hello")
        .expect_header_values("Content-Length", ["4"])
        .try_run()
        .await
        .unwrap();

    assert!(!report.is_pass());
    let failure = &report.failures()[0];
    assert_eq!(failure.facet, "header");
    assert!(failure.message.contains("\"5\""), "got: {}", failure.message);
}

#[tokio::test]
async fn expectations_run_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let app = Harness::text(200, "ok");

    let mut spec = app.spec("ordering").get("/");
    for i in 0..5 {
        let log = Arc::clone(&log);
        spec = spec.expect_with(move |_res| log.lock().unwrap().push(i));
    }
    spec.run().await;

    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Item {
    name: String,
    created_at: DateTime<Utc>,
}

#[tokio::test]
async fn json_round_trip_is_a_left_inverse() {
    let app = json_echo_app();
    let item = Item {
        name: "widget".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
    };

    let expected = item.clone();
    app.spec("json_round_trip")
        .post("items")
        .exchange_json(&item, 200, move |decoded: Item| {
            assert_eq!(decoded, expected);
        })
        .run()
        .await;
}

#[tokio::test]
async fn send_json_hands_back_the_raw_response() {
    let app = json_echo_app();

    app.spec("send_json_raw")
        .post("items")
        .send_json(&serde_json::json!({"name": "gear"}), 200, |res| {
            let body = res.body().expect("echoed body");
            assert_eq!(body.as_ref(), br#"{"name":"gear"}"#);
        })
        .run()
        .await;
}

#[tokio::test]
async fn receive_json_decodes_without_a_request_body() {
    let app = Harness::new(|_req: Request| async {
        http::Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(r#"{"name":"fixed","created_at":"2024-06-15T09:00:00Z"}"#)))
            .unwrap()
    });

    app.spec("receive_json")
        .get("items/1")
        .receive_json(200, |decoded: Item| {
            assert_eq!(decoded.name, "fixed");
        })
        .run()
        .await;
}

#[tokio::test]
async fn decode_of_absent_body_fails_without_callback() {
    let called = Arc::new(AtomicBool::new(false));
    let app = Harness::new(|_req: Request| async {
        http::Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Full::new(Bytes::new()))
            .unwrap()
    });

    let flag = Arc::clone(&called);
    let report = app
        .spec("decode_absent_body")
        .delete("items/1")
        .expect_json(move |_: serde_json::Value| flag.store(true, Ordering::SeqCst))
        .try_run()
        .await
        .unwrap();

    assert!(!report.is_pass());
    assert_eq!(report.failures()[0].facet, "decoded body");
    assert!(!called.load(Ordering::SeqCst), "callback must not run");
}

#[tokio::test]
async fn content_type_is_checked_against_the_actual_header() {
    let app = Harness::text(200, "plain");
    let report = app
        .spec("content_type_actual")
        .get("/")
        .expect_content_type("application/json")
        .try_run()
        .await
        .unwrap();

    assert!(!report.is_pass(), "a wrong content type must not pass vacuously");
    assert!(
        report.failures()[0].message.contains("text/plain"),
        "mismatch must name the actual value: {}",
        report.failures()[0].message
    );

    app.spec("content_type_match")
        .get("/")
        .expect_content_type("text/plain; charset=utf-8")
        .run()
        .await;
}

#[tokio::test]
async fn relative_paths_are_made_absolute() {
    let app = Harness::echo();
    app.spec("path_normalization")
        .get("deeply/nested")
        .expect_json(|value: serde_json::Value| {
            assert_eq!(value["path"], "/deeply/nested");
        })
        .run()
        .await;
}

#[tokio::test]
async fn failures_aggregate_across_facets() {
    let app = Harness::text(503, "down");
    let report = app
        .spec("aggregate_failures")
        .get("/health")
        .expect_status(200)
        .expect_header("X-Request-Id")
        .expect_content_type("application/json")
        .try_run()
        .await
        .unwrap();

    assert_eq!(report.failures().len(), 3);
    let facets: Vec<_> = report.failures().iter().map(|f| f.facet).collect();
    assert_eq!(facets, vec!["status", "header", "content-type"]);
    assert_eq!(report.evaluated(), 3);
}

#[tokio::test]
async fn report_renders_the_spec_name() {
    let app = Harness::text(200, "ok");
    let report = app
        .spec("named_report")
        .get("/")
        .expect_status(200)
        .try_run()
        .await
        .unwrap();

    assert_eq!(report.name(), "named_report");
    assert!(report.to_string().contains("named_report"));
}

#[tokio::test]
#[should_panic(expected = "expected status 200, got 404")]
async fn run_panics_with_the_rendered_report() {
    let app = single_route_app();
    app.spec("run_panics")
        .get("foo")
        .expect_status(200)
        .run()
        .await;
}
