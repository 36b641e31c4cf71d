//! In-process stand-in for the Todo service, used by the offline
//! orchestrator tests. It covers just enough surface to exercise session
//! acquisition, header attachment, negotiation, overrides, captures, and
//! slow responses. It is test scaffolding, not a service implementation.

use hyper::service::{make_service_fn, service_fn};
use hyper::{body, Body, Request, Response, Server};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct StubState {
    issued_tokens: u32,
    last_created: Option<Value>,
}

/// Handle for a stub bound to an ephemeral loopback port.
pub struct StubServer {
    addr: SocketAddr,
    join: JoinHandle<()>,
}

impl StubServer {
    /// Binds and serves on 127.0.0.1:0. Must be called from a tokio
    /// runtime.
    pub fn start() -> Self {
        let state = Arc::new(Mutex::new(StubState::default()));

        let make_service = make_service_fn(move |_| {
            let state = state.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request| {
                    let state = state.clone();
                    async move { Ok::<_, Infallible>(handle(request, state).await) }
                }))
            }
        });

        let server =
            Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_service);
        let addr = server.local_addr();
        let join = tokio::spawn(async move {
            if let Err(e) = server.await {
                eprintln!("stub server error: {}", e);
            }
        });

        Self { addr, join }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn shutdown(self) {
        self.join.abort();
    }
}

/// Returns a loopback address nothing is listening on, for
/// connection-refused tests.
pub fn unused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

async fn handle(mut request: Request<Body>, state: Arc<Mutex<StubState>>) -> Response<Body> {
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();
    tracing::debug!(method = method.as_str(), path = path.as_str(), "stub request");

    match (method.as_str(), path.as_str()) {
        ("POST", "/challenger") => {
            let token = {
                let mut state = state.lock().unwrap();
                state.issued_tokens += 1;
                format!("stub-token-{}", state.issued_tokens)
            };
            Response::builder()
                .status(201)
                .header("x-challenger", token)
                .body(Body::empty())
                .unwrap()
        }
        ("GET", "/todos") => {
            if request.headers().get("x-challenger").is_none() {
                return json_response(401, json!({"errorMessages": ["no session token"]}));
            }
            let accept = request
                .headers()
                .get("accept")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string();
            todos_response(&accept)
        }
        ("POST", "/todos") => {
            let bytes = body::to_bytes(request.body_mut()).await.unwrap_or_default();
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(mut submitted) => {
                    if let Some(fields) = submitted.as_object_mut() {
                        fields.insert(String::from("id"), json!(42));
                    }
                    state.lock().unwrap().last_created = Some(submitted.clone());
                    json_response(201, submitted)
                }
                Err(_) => json_response(400, json!({"errorMessages": ["not json"]})),
            }
        }
        ("GET", "/todos/42") => {
            let created = state.lock().unwrap().last_created.clone();
            match created {
                Some(todo) => json_response(200, json!({ "todos": [todo] })),
                None => json_response(404, json!({"errorMessages": ["nothing created yet"]})),
            }
        }
        ("GET", "/heartbeat") => Response::builder().status(204).body(Body::empty()).unwrap(),
        ("DELETE", "/heartbeat") => status_only(405),
        ("PATCH", "/heartbeat") => status_only(500),
        ("TRACE", "/heartbeat") => status_only(501),
        ("POST", "/heartbeat") => {
            let target = request
                .headers()
                .get("x-http-method-override")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("");
            match target {
                "DELETE" => status_only(405),
                "PATCH" => status_only(500),
                "TRACE" => status_only(501),
                _ => status_only(200),
            }
        }
        ("GET", "/slow") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            status_only(200)
        }
        _ => json_response(404, json!({"errorMessages": ["no such endpoint"]})),
    }
}

fn todos_response(accept: &str) -> Response<Body> {
    // explicit XML wins, empty or json-ish accepts default to JSON,
    // anything else is unrecognised
    if accept.contains("application/xml") {
        Response::builder()
            .status(200)
            .header("content-type", "application/xml")
            .body(Body::from(
                "<todos><todo><id>1</id><title>wash dishes</title></todo></todos>",
            ))
            .unwrap()
    } else if accept.is_empty() || accept.contains("application/json") || accept.contains("*/*") {
        json_response(
            200,
            json!({"todos": [
                {"id": 1, "title": "wash dishes", "doneStatus": false, "description": ""},
                {"id": 2, "title": "file paperwork", "doneStatus": true, "description": ""}
            ]}),
        )
    } else {
        json_response(406, json!({"errorMessages": ["Unrecognised Accept Type"]}))
    }
}

fn json_response(status: u16, value: Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

fn status_only(status: u16) -> Response<Body> {
    Response::builder().status(status).body(Body::empty()).unwrap()
}
