mod config;
mod data;
mod error;
mod executor;
mod http_client;
mod matcher;
mod runner;
mod scenario;
mod session;
mod validator;

pub use config::{RunnerConfiguration, BASE_URL_ENV, PASSWORD_ENV, TIMEOUT_ENV, USER_ENV};
pub use data::{
    ObservedResponse, Payload, Todo, TodoList, Verb, WireRequest, METHOD_OVERRIDE_HEADER,
};
pub use error::Error;
pub use executor::{RequestExecutor, RunContext};
pub use http_client::{HttpClient, HyperHttpClient};
pub use matcher::{BodyMatch, LengthBound, ValueMatch};
pub use runner::{ContractRunner, Outcome, RunReport, RunState, ScenarioOutcome};
pub use scenario::{Capture, CaptureSource, Contract, Scenario};
pub use session::{
    BasicCredentials, Session, SessionManager, AUTH_TOKEN_HEADER, SESSION_HEADER,
};
pub use validator::{validate, Verdict};
