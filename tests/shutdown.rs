//! Bounded graceful shutdown against a live listener.

use std::time::{Duration, Instant};

use axum::{routing::get, Router};

use user_service::{HttpServer, ShutdownOutcome};

mod common;

fn slow_router(delay: Duration) -> Router {
    Router::new().route(
        "/slow",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "done"
        }),
    )
}

#[tokio::test]
async fn in_flight_request_completes_within_grace() {
    let running = common::spawn_server(HttpServer::from_router(slow_router(
        Duration::from_secs(1),
    )));

    let url = running.url("/slow");
    let request = tokio::spawn(async move { reqwest::get(url).await?.text().await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    running.shutdown.trigger();

    let outcome = running.task.await.unwrap().unwrap();
    assert_eq!(outcome, ShutdownOutcome::Graceful);
    assert_eq!(request.await.unwrap().unwrap(), "done");
}

#[tokio::test]
async fn grace_period_expiry_forces_close() {
    let server = HttpServer::from_router(slow_router(Duration::from_secs(3)))
        .with_shutdown_grace(Duration::from_millis(300));
    let running = common::spawn_server(server);

    let url = running.url("/slow");
    let request = tokio::spawn(async move { reqwest::get(url).await?.text().await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    let started = Instant::now();
    running.shutdown.trigger();

    let outcome = running.task.await.unwrap().unwrap();
    assert_eq!(outcome, ShutdownOutcome::TimedOut);
    assert!(started.elapsed() < Duration::from_secs(2));

    assert!(request.await.unwrap().is_err());
}

#[tokio::test]
async fn idle_server_stops_immediately() {
    let running = common::spawn_server(HttpServer::from_router(slow_router(
        Duration::from_secs(1),
    )));

    let started = Instant::now();
    running.shutdown.trigger();

    let outcome = running.task.await.unwrap().unwrap();
    assert_eq!(outcome, ShutdownOutcome::Graceful);
    assert!(started.elapsed() < Duration::from_secs(1));
}
