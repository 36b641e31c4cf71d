//! Offline integration tests: the whole orchestration path exercised
//! against the in-process stub service.

use api_tests::stub::{unused_base_url, StubServer};
use api_tests::init_tracing;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use todocheck::{
    BodyMatch, ContractRunner, Error, HyperHttpClient, LengthBound, Outcome, RunnerConfiguration,
    Scenario, SessionManager, ValueMatch,
};

fn config_for(stub: &StubServer) -> RunnerConfiguration {
    let mut config = RunnerConfiguration::new(stub.base_url());
    config.set_timeout(Duration::from_secs(5));
    config
}

#[tokio::test]
async fn bootstrap_yields_independent_tokens() {
    init_tracing();
    let stub = StubServer::start();
    let client = Arc::new(HyperHttpClient::new(Duration::from_secs(5)));
    let manager = SessionManager::new(client, stub.base_url());

    let first = manager.acquire().await.expect("first session");
    let second = manager.acquire().await.expect("second session");
    assert_ne!(first.token(), second.token());

    stub.shutdown();
}

#[tokio::test]
async fn a_full_run_passes_with_captures_and_negotiation() {
    init_tracing();
    let stub = StubServer::start();
    let mut runner = ContractRunner::new(config_for(&stub));
    runner.add_scenarios(vec![
        Scenario::get("list todos", "/todos")
            .expect_status(200)
            .expect_body(BodyMatch::Length {
                pointer: String::from("/todos"),
                bound: LengthBound::Exactly(2),
            }),
        Scenario::get("list todos as xml", "/todos")
            .header("accept", "application/xml")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::contains("application/xml"))
            .expect_body(BodyMatch::Contains(String::from("<title>wash dishes</title>"))),
        Scenario::get("xml preferred over json", "/todos")
            .header("accept", "application/xml, application/json")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::exact("application/xml")),
        Scenario::get("unsupported accept is 406", "/todos")
            .header("accept", "application/gzip")
            .expect_status(406)
            .expect_body(BodyMatch::JsonSubset(json!({
                "errorMessages": ["Unrecognised Accept Type"]
            }))),
        Scenario::get("missing session token is rejected", "/todos")
            .without_session()
            .expect_status(401),
        Scenario::post("create a todo", "/todos")
            .json_body(json!({"title": "from the suite", "doneStatus": false}))
            .expect_status(201)
            .expect_body(BodyMatch::JsonSubset(json!({"title": "from the suite"})))
            .capture_body("todo_id", "/id"),
        Scenario::get("fetch the created todo", "/todos/{todo_id}")
            .depends_on("create a todo")
            .expect_status(200)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/todos"),
                element: json!({"id": 42, "title": "from the suite"}),
            }),
    ]);

    let report = runner.run().await.expect("run completes");
    assert!(report.success(), "unexpected failures:\n{}", report);
    assert_eq!(report.outcomes.len(), 7);

    stub.shutdown();
}

#[tokio::test]
async fn method_override_reaches_the_blocked_verbs() {
    init_tracing();
    let stub = StubServer::start();
    let mut runner = ContractRunner::new(config_for(&stub));
    runner.add_scenarios(vec![
        Scenario::get("heartbeat is silent", "/heartbeat")
            .expect_status(204)
            .expect_body(BodyMatch::Absent),
        Scenario::delete("delete heartbeat directly", "/heartbeat").expect_status(405),
        Scenario::with_override("override delete", "DELETE", "/heartbeat").expect_status(405),
        Scenario::with_override("override patch", "PATCH", "/heartbeat").expect_status(500),
        Scenario::with_override("override trace", "TRACE", "/heartbeat").expect_status(501),
    ]);

    let report = runner.run().await.expect("run completes");
    assert!(report.success(), "unexpected failures:\n{}", report);

    stub.shutdown();
}

#[tokio::test]
async fn a_contract_mismatch_skips_dependents_but_not_independents() {
    init_tracing();
    let stub = StubServer::start();
    let mut runner = ContractRunner::new(config_for(&stub));
    runner.add_scenarios(vec![
        Scenario::get("wrong expectation", "/todos").expect_status(500),
        Scenario::get("consumer of the failure", "/todos")
            .depends_on("wrong expectation")
            .expect_status(200),
        Scenario::get("independent bystander", "/todos").expect_status(200),
    ]);

    let report = runner.run().await.expect("run completes");
    assert!(!report.success());
    assert!(!report.aborted);

    match &report.outcomes[0].outcome {
        Outcome::Failed { diffs } => {
            assert_eq!(diffs, &["status: expected 500, got 200"]);
        }
        other => panic!("expected a failure, got {:?}", other),
    }
    assert!(matches!(report.outcomes[1].outcome, Outcome::Skipped { .. }));
    assert!(matches!(report.outcomes[2].outcome, Outcome::Passed));

    stub.shutdown();
}

#[tokio::test]
async fn a_timeout_is_a_transport_error_and_aborts_the_rest() {
    init_tracing();
    let stub = StubServer::start();
    let mut config = RunnerConfiguration::new(stub.base_url());
    config.set_timeout(Duration::from_millis(200));
    let mut runner = ContractRunner::new(config);
    runner.add_scenarios(vec![
        Scenario::get("stalls past the deadline", "/slow").expect_status(200),
        Scenario::get("never reached", "/todos").expect_status(200),
    ]);

    let report = runner.run().await.expect("run completes with a report");
    assert!(report.aborted);
    assert!(matches!(report.outcomes[0].outcome, Outcome::Errored { .. }));
    assert!(matches!(report.outcomes[1].outcome, Outcome::Skipped { .. }));

    stub.shutdown();
}

#[tokio::test]
async fn a_refused_connection_is_a_transport_error_not_a_status() {
    init_tracing();
    let client = Arc::new(HyperHttpClient::new(Duration::from_secs(2)));
    let manager = SessionManager::new(client, unused_base_url());

    match manager.acquire().await {
        Err(Error::Transport(_)) => {}
        other => panic!("expected a transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_dependencies_are_rejected_before_any_request() {
    init_tracing();
    // deliberately unreachable base URL: the declaration check must fire
    // before any network traffic
    let mut runner = ContractRunner::new(RunnerConfiguration::new(unused_base_url()));
    runner.add_scenario(Scenario::get("orphan", "/todos").depends_on("never declared"));

    match runner.run().await {
        Err(Error::UnknownDependency { depends_on, .. }) => {
            assert_eq!(depends_on, "never declared");
        }
        other => panic!("expected UnknownDependency, got {:?}", other),
    }
}
