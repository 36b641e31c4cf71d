//! The live suite: runs the full catalog against a real API Challenges
//! instance. Enable with `--features live`; target and timeout come from
//! the `TODOCHECK_*` environment.

use api_tests::{catalog, init_tracing};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use todocheck::{
    HyperHttpClient, RequestExecutor, RunContext, RunnerConfiguration, Scenario, SessionManager,
    Todo,
};

fn configuration() -> RunnerConfiguration {
    RunnerConfiguration::from_env().expect("TODOCHECK_* environment is valid")
}

fn session_manager(config: &RunnerConfiguration) -> SessionManager {
    let client = Arc::new(HyperHttpClient::new(config.timeout()));
    SessionManager::new(client, config.base_url())
}

#[tokio::test]
async fn the_full_catalog_holds_against_the_live_service() {
    init_tracing();
    let mut runner = todocheck::ContractRunner::new(configuration());
    runner.add_scenarios(catalog::full_suite());

    let report = runner.run().await.expect("suite run completes");
    eprintln!("{}", report);
    assert!(report.success(), "contract mismatches against the live service");
}

#[tokio::test]
async fn bootstrap_is_not_idempotent_by_design() {
    init_tracing();
    let config = configuration();
    let manager = session_manager(&config);

    let first = manager.acquire().await.expect("first session");
    let second = manager.acquire().await.expect("second session");
    // two bootstraps must yield two independent identities
    assert_ne!(first.token(), second.token());
}

#[tokio::test]
async fn a_created_todo_reads_back_unchanged() {
    init_tracing();
    let config = configuration();
    let manager = session_manager(&config);
    let session = manager.acquire().await.expect("session");

    let client = Arc::new(HyperHttpClient::new(config.timeout()));
    let executor = RequestExecutor::new(client, config.base_url());
    let context = RunContext::new(session);

    let create = Scenario::post("create", "/todos").json_body(json!({
        "title": "round trip",
        "doneStatus": true,
        "description": "no silent transformation"
    }));
    let created = executor.execute(&create, &context).await.expect("create");
    assert_eq!(created.status, 201);
    let created: Todo = serde_json::from_str(&created.body).expect("created todo decodes");
    assert_eq!(created.title, "round trip");
    assert!(created.done_status);

    let fetch = Scenario::get("fetch", format!("/todos/{}", created.id));
    let fetched = executor.execute(&fetch, &context).await.expect("fetch");
    assert_eq!(fetched.status, 200);
    let body: serde_json::Value = serde_json::from_str(&fetched.body).expect("list decodes");
    let todos = body["todos"].as_array().expect("todos array");
    let fetched: Todo =
        serde_json::from_value(todos[0].clone()).expect("fetched todo decodes");
    assert_eq!(fetched, created);
}

// The XML representation of a todo, as the service renders it.
#[derive(Debug, Deserialize)]
struct XmlTodo {
    id: u64,
    title: String,
    #[serde(rename = "doneStatus")]
    done_status: bool,
    description: String,
}

#[tokio::test]
async fn a_json_submission_translates_to_xml_on_request() {
    init_tracing();
    let config = configuration();
    let manager = session_manager(&config);
    let session = manager.acquire().await.expect("session");

    let client = Arc::new(HyperHttpClient::new(config.timeout()));
    let executor = RequestExecutor::new(client, config.base_url());
    let context = RunContext::new(session);

    let create = Scenario::post("create xml out", "/todos")
        .header("accept", "application/xml")
        .json_body(json!({
            "title": "xml rendering",
            "doneStatus": false,
            "description": "same logical resource"
        }));
    let response = executor.execute(&create, &context).await.expect("create");
    assert_eq!(response.status, 201);
    assert!(response
        .header("content-type")
        .unwrap_or_default()
        .contains("application/xml"));

    let todo: XmlTodo = quick_xml::de::from_str(&response.body).expect("xml todo decodes");
    assert!(todo.id > 0);
    assert_eq!(todo.title, "xml rendering");
    assert!(!todo.done_status);
    assert_eq!(todo.description, "same logical resource");
}

#[tokio::test]
async fn the_secondary_token_guards_the_secret_note() {
    init_tracing();
    let config = configuration();
    let manager = session_manager(&config);
    let session = manager.acquire().await.expect("session");

    let credentials = config
        .credentials()
        .cloned()
        .unwrap_or_else(|| todocheck::BasicCredentials::new("admin", "password"));
    let token = manager
        .acquire_secondary_token(&session, &credentials)
        .await
        .expect("secondary token");
    assert!(!token.is_empty());

    let wrong = todocheck::BasicCredentials::new("admin", "not-the-password");
    match manager.acquire_secondary_token(&session, &wrong).await {
        Err(todocheck::Error::Auth(status)) => assert_eq!(status, 401),
        other => panic!("expected an auth rejection, got {:?}", other),
    }
}
