use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The header used to smuggle verbs the transport or target rejects
/// (TRACE and friends) through an ordinary POST.
pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// Request verb. `Override` sends a POST carrying the wrapped verb in the
/// method-override header, because the service refuses some verbs directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Trace,
    Override(&'static str),
}

impl Verb {
    /// The method actually put on the wire.
    pub fn wire_method(&self) -> &str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Patch => "PATCH",
            Verb::Options => "OPTIONS",
            Verb::Trace => "TRACE",
            Verb::Override(_) => "POST",
        }
    }

    pub fn override_target(&self) -> Option<&'static str> {
        match self {
            Verb::Override(verb) => Some(verb),
            _ => None,
        }
    }
}

/// Request body as declared by a scenario. The executor forwards it
/// verbatim; deliberately malformed values are part of the contract under
/// test and must survive untouched.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Xml(String),
    Empty,
}

impl Payload {
    pub fn to_wire(&self) -> Result<String, Error> {
        match self {
            Payload::Json(value) => Ok(serde_json::to_string(value)?),
            Payload::Xml(text) => Ok(text.clone()),
            Payload::Empty => Ok(String::new()),
        }
    }

    /// Content type implied by the payload kind, used only when the
    /// scenario didn't pick one itself.
    pub fn default_content_type(&self) -> Option<&'static str> {
        match self {
            Payload::Json(_) => Some("application/json"),
            Payload::Xml(_) => Some("application/xml"),
            Payload::Empty => None,
        }
    }
}

/// A fully resolved request, ready for the transport: placeholders
/// substituted, session header attached, override header applied.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// What came back from the service. Header names are lowercased on
/// extraction, matching what hyper hands out.
#[derive(Debug, Clone)]
pub struct ObservedResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ObservedResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|v| v.as_str())
    }

    pub fn json(&self) -> Result<Value, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The Todo resource as the service represents it. Owned by the service;
/// the orchestrator only ever observes it through responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(rename = "doneStatus")]
    pub done_status: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}
