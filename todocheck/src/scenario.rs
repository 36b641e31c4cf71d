use crate::data::{Payload, Verb};
use crate::error::Error;
use crate::matcher::{BodyMatch, ValueMatch};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{(?P<key>[a-z_][a-z0-9_]*)\}").unwrap();
}

/// Expected response shape for one scenario: exact status, a subset of
/// headers, and zero or more body predicates.
#[derive(Debug, Clone)]
pub struct Contract {
    pub status: u16,
    pub headers: Vec<(String, ValueMatch)>,
    pub body: Vec<BodyMatch>,
}

impl Contract {
    fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
}

/// Where a captured value comes from in the response.
#[derive(Debug, Clone)]
pub enum CaptureSource {
    /// JSON pointer into the response body, e.g. `/id`.
    BodyPointer(String),
    /// A response header, e.g. `x-auth-token`.
    Header(String),
}

/// A value to pull out of a passing response and make available to later
/// scenarios under `{key}`.
#[derive(Debug, Clone)]
pub struct Capture {
    pub key: String,
    pub source: CaptureSource,
}

/// One declarative HTTP-contract test case: the request to issue and the
/// contract the response must satisfy. Immutable once built; executed in
/// declaration order.
///
/// Paths and header values may contain `{placeholders}` resolved from the
/// run context: `{token}` and `{auth_token}` come from the session, anything
/// else from a prior scenario's capture.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    verb: Verb,
    path: String,
    headers: Vec<(String, String)>,
    payload: Payload,
    attach_session: bool,
    expected: Contract,
    depends_on: Vec<String>,
    captures: Vec<Capture>,
}

impl Scenario {
    pub fn new<N: Into<String>, P: Into<String>>(name: N, verb: Verb, path: P) -> Self {
        Self {
            name: name.into(),
            verb,
            path: path.into(),
            headers: Vec::new(),
            payload: Payload::Empty,
            attach_session: true,
            expected: Contract::new(200),
            depends_on: Vec::new(),
            captures: Vec::new(),
        }
    }

    pub fn get<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, Verb::Get, path)
    }

    pub fn head<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, Verb::Head, path)
    }

    pub fn post<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, Verb::Post, path)
    }

    pub fn put<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, Verb::Put, path)
    }

    pub fn delete<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, Verb::Delete, path)
    }

    pub fn patch<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, Verb::Patch, path)
    }

    pub fn trace<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, Verb::Trace, path)
    }

    /// POST carrying `verb` in the method-override header.
    pub fn with_override<N: Into<String>, P: Into<String>>(
        name: N,
        verb: &'static str,
        path: P,
    ) -> Self {
        Self::new(name, Verb::Override(verb), path)
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json_body(mut self, value: Value) -> Self {
        self.payload = Payload::Json(value);
        self
    }

    pub fn xml_body<S: Into<String>>(mut self, text: S) -> Self {
        self.payload = Payload::Xml(text.into());
        self
    }

    /// Don't attach the session token to this request (used for
    /// unauthenticated contracts).
    pub fn without_session(mut self) -> Self {
        self.attach_session = false;
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected.status = status;
        self
    }

    pub fn expect_header<K: Into<String>>(mut self, name: K, value: ValueMatch) -> Self {
        self.expected.headers.push((name.into(), value));
        self
    }

    pub fn expect_body(mut self, body: BodyMatch) -> Self {
        self.expected.body.push(body);
        self
    }

    /// Declares that this scenario consumes a side effect of `name`; if that
    /// scenario fails, this one is skipped instead of run.
    pub fn depends_on<S: Into<String>>(mut self, name: S) -> Self {
        self.depends_on.push(name.into());
        self
    }

    pub fn capture_body<K: Into<String>, P: Into<String>>(mut self, key: K, pointer: P) -> Self {
        self.captures.push(Capture {
            key: key.into(),
            source: CaptureSource::BodyPointer(pointer.into()),
        });
        self
    }

    pub fn capture_header<K: Into<String>, H: Into<String>>(mut self, key: K, header: H) -> Self {
        self.captures.push(Capture {
            key: key.into(),
            source: CaptureSource::Header(header.into()),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    pub fn path_template(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn attaches_session(&self) -> bool {
        self.attach_session
    }

    pub fn expected(&self) -> &Contract {
        &self.expected
    }

    pub fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }
}

/// Substitutes `{placeholders}` in `template` using `lookup`. A placeholder
/// without a value is a configuration defect, not a contract mismatch.
pub fn resolve_template<F>(template: &str, lookup: F) -> Result<String, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = String::with_capacity(template.len());
    let mut last_end = 0;

    for captures in PLACEHOLDER_REGEX.captures_iter(template) {
        let whole = captures.get(0).unwrap();
        let key = &captures["key"];
        resolved.push_str(&template[last_end..whole.start()]);
        match lookup(key) {
            Some(value) => resolved.push_str(&value),
            None => return Err(Error::MissingCapture(String::from(key))),
        }
        last_end = whole.end();
    }
    resolved.push_str(&template[last_end..]);

    Ok(resolved)
}
