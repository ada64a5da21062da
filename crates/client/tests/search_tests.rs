//! Search job lifecycle tests.
//!
//! This module tests `SplunkClient::search` end to end against a mock server:
//! - Submit, poll until DONE, fetch results
//! - FAILED jobs, timeouts and cancellation
//! - Teardown (DELETE) on every path after submission
//!
//! # Invariants
//! - Every test that submits a job expects exactly one DELETE
//! - Teardown failures never change the search result

mod common;

use std::time::{Duration, Instant};

use common::*;
use splunk_client::{CancellationToken, ClientError, SearchRequest};
use wiremock::matchers::{body_string_contains, method, path, query_param};

const SID: &str = "1760612345.42";

async fn mount_create_job(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("search/create_job.json")),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_job_state(server: &MockServer, fixture: &str, times: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{}", SID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(fixture)));
    let mock = match times {
        Some(n) => mock.up_to_n_times(n),
        None => mock,
    };
    mock.mount(server).await;
}

async fn mount_delete(server: &MockServer, status: u16) {
    Mock::given(method("DELETE"))
        .and(path(format!("/services/search/jobs/{}", SID)))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}

fn fast_request(query: &str) -> SearchRequest {
    SearchRequest::new(query).poll_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn test_search_success_returns_results_and_deletes_job() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .and(body_string_contains("search=index%3Dmain"))
        .and(body_string_contains("earliest_time=-1h"))
        .and(body_string_contains("max_count=10"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("search/create_job.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_job_state(&mock_server, "search/job_running.json", Some(2)).await;
    mount_job_state(&mock_server, "search/job_done.json", None).await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{}/results", SID)))
        .and(query_param("output_mode", "json"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/results.json")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_delete(&mock_server, 200).await;

    let request = fast_request("index=main").earliest_time("-1h").max_count(10);
    let outcome = client.search(&request).await.unwrap();

    assert_eq!(outcome.sid, SID);
    assert_eq!(outcome.result_count(), 2);
    assert_eq!(outcome.results[0]["host"], "web-01");
    assert_eq!(outcome.messages.len(), 1);
    assert!(outcome.search_time >= 0.0);
}

#[tokio::test]
async fn test_failed_job_reports_messages_and_deletes_job() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    mount_create_job(&mock_server).await;
    mount_job_state(&mock_server, "search/job_failed.json", None).await;
    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{}/results", SID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_delete(&mock_server, 200).await;

    let err = client
        .search(&fast_request("index=main | badcommand"))
        .await
        .unwrap_err();

    match &err {
        ClientError::SearchFailed { messages } => {
            assert_eq!(
                messages,
                &vec!["FATAL: Unknown search command 'badcommand'.".to_string()]
            );
        }
        other => panic!("Expected SearchFailed, got {:?}", other),
    }
    assert!(err.to_string().contains("badcommand"));
}

#[tokio::test]
async fn test_search_timeout_deletes_job() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    mount_create_job(&mock_server).await;
    mount_job_state(&mock_server, "search/job_running.json", None).await;
    mount_delete(&mock_server, 200).await;

    let request = SearchRequest::new("index=main")
        .timeout(Duration::from_secs(1))
        .poll_interval(Duration::from_millis(100));

    let start = Instant::now();
    let err = client.search(&request).await.unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, ClientError::SearchTimeout { timeout_secs: 1 }));
    assert!(elapsed >= Duration::from_secs(1), "returned after {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "returned after {:?}", elapsed);
}

#[tokio::test]
async fn test_cancelled_search_still_deletes_job() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    mount_create_job(&mock_server).await;
    mount_job_state(&mock_server, "search/job_running.json", None).await;
    mount_delete(&mock_server, 200).await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        trigger.cancel();
    });

    let request = fast_request("index=main").timeout(Duration::from_secs(30));
    let err = client
        .search_with_cancel(&request, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn test_delete_failure_does_not_mask_success() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    mount_create_job(&mock_server).await;
    mount_job_state(&mock_server, "search/job_done.json", None).await;
    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{}/results", SID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/results.json")))
        .mount(&mock_server)
        .await;
    mount_delete(&mock_server, 500).await;

    let outcome = client.search(&fast_request("index=main")).await.unwrap();
    assert_eq!(outcome.result_count(), 2);
}

#[tokio::test]
async fn test_status_error_is_reported_and_job_deleted() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    mount_create_job(&mock_server).await;
    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{}", SID)))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;
    mount_delete(&mock_server, 200).await;

    let err = client.search(&fast_request("index=main")).await.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 503, .. }));
}

#[tokio::test]
async fn test_rejected_submission_skips_teardown() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Error in 'search' command"))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client.search(&fast_request("| bad")).await.unwrap_err();
    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("search"));
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_before_connect_is_not_connected() {
    let mock_server = MockServer::start().await;
    let client = splunk_client::SplunkClient::new(token_config(&mock_server));

    let err = client.search(&fast_request("index=main")).await.unwrap_err();
    assert!(matches!(err, ClientError::NotConnected));
}
