use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use busbar_at_api::client::RateLimitConfig;
use busbar_at_api::{ErrorKind, RetryConfig};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{airtable_with, record_json, Task, BASE_ID};

async fn mount_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_json("rec1", "a")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_tables_of_one_base_share_the_limit() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let interval = Duration::from_millis(100);
    let airtable = airtable_with(
        &server,
        RateLimitConfig {
            min_interval: interval,
        },
        None,
    );
    let base = airtable.base(BASE_ID).unwrap();
    let first = base.table::<Task>("First").unwrap();
    let second = base.table::<Task>("Second").unwrap();

    let started = Instant::now();
    let (a, b, c) = tokio::join!(
        first.retrieve_record("rec1"),
        second.retrieve_record("rec1"),
        first.retrieve_record("rec1"),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    // Three starts on one key need at least two full intervals.
    assert!(started.elapsed() >= interval * 2);
    assert_eq!(airtable.inner().rate_limiter().tracked_keys(), 1);
}

#[tokio::test]
async fn test_distinct_bases_do_not_wait_for_each_other() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let interval = Duration::from_secs(2);
    let airtable = airtable_with(
        &server,
        RateLimitConfig {
            min_interval: interval,
        },
        None,
    );
    let one = airtable.base("appOne").unwrap().table::<Task>("T").unwrap();
    let two = airtable.base("appTwo").unwrap().table::<Task>("T").unwrap();

    let started = Instant::now();
    let (a, b) = tokio::join!(one.retrieve_record("rec1"), two.retrieve_record("rec1"));
    a.unwrap();
    b.unwrap();

    assert!(started.elapsed() < interval);
    assert_eq!(airtable.inner().rate_limiter().tracked_keys(), 2);
}

#[tokio::test]
async fn test_transient_failures_are_retried_through_the_hierarchy() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    Mock::given(method("GET"))
        .respond_with(move |_: &wiremock::Request| {
            match calls_clone.fetch_add(1, Ordering::SeqCst) {
                0 => ResponseTemplate::new(503),
                1 => ResponseTemplate::new(429).set_body_json(serde_json::json!({
                    "errors": [{"error": "RATE_LIMIT_REACHED"}]
                })),
                _ => ResponseTemplate::new(200).set_body_json(record_json("rec1", "a")),
            }
        })
        .mount(&server)
        .await;

    let retry = RetryConfig::default()
        .with_base_wait(Duration::from_millis(20))
        .with_unit(Duration::from_millis(5));
    let airtable = airtable_with(&server, RateLimitConfig::disabled(), Some(retry));
    let table = airtable.base(BASE_ID).unwrap().table::<Task>("Tasks").unwrap();

    let record = table.retrieve_record("rec1").await.unwrap();
    assert_eq!(record.fields().name, "a");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_ceiling_reports_last_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let retry = RetryConfig::default()
        .with_max_attempts(2)
        .with_base_wait(Duration::from_millis(1))
        .with_unit(Duration::from_millis(1));
    let airtable = airtable_with(&server, RateLimitConfig::disabled(), Some(retry));
    let table = airtable.base(BASE_ID).unwrap().table::<Task>("Tasks").unwrap();

    let err = table.retrieve_record("rec1").await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RetriesExhausted { .. }));
}

#[tokio::test]
async fn test_close_stops_every_handle() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let airtable = airtable_with(&server, RateLimitConfig::default(), None);
    let table = airtable.base(BASE_ID).unwrap().table::<Task>("Tasks").unwrap();
    table.retrieve_record("rec1").await.unwrap();

    airtable.close();
    airtable.close();

    let err = table.retrieve_record("rec1").await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Closed));
    assert_eq!(airtable.inner().rate_limiter().tracked_keys(), 0);
}
