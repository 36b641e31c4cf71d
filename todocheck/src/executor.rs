use crate::data::{ObservedResponse, Payload, WireRequest, METHOD_OVERRIDE_HEADER};
use crate::error::Error;
use crate::http_client::HttpClient;
use crate::scenario::{resolve_template, Scenario};
use crate::session::{Session, SESSION_HEADER};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Values available to `{placeholder}` templates: the session tokens plus
/// whatever earlier scenarios captured.
#[derive(Debug)]
pub struct RunContext {
    session: Session,
    captures: HashMap<String, String>,
}

impl RunContext {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            captures: HashMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.captures.insert(key.into(), value.into());
    }

    /// `token` and `auth_token` resolve from the session; captures can
    /// shadow `auth_token` when a scenario obtained one mid-run.
    pub fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = self.captures.get(key) {
            return Some(value.clone());
        }
        match key {
            "token" => Some(String::from(self.session.token())),
            "auth_token" => self.session.auth_token().map(String::from),
            _ => None,
        }
    }
}

/// Issues one scenario's request. Resolution only: templates are
/// substituted and the session header attached, but the body goes out
/// exactly as declared — this layer never validates or repairs anything.
#[derive(Debug)]
pub struct RequestExecutor {
    client: Arc<dyn HttpClient + Send + Sync>,
    base_url: String,
}

impl RequestExecutor {
    pub fn new<S: Into<String>>(client: Arc<dyn HttpClient + Send + Sync>, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn client(&self) -> Arc<dyn HttpClient + Send + Sync> {
        self.client.clone()
    }

    pub async fn execute(
        &self,
        scenario: &Scenario,
        context: &RunContext,
    ) -> Result<ObservedResponse, Error> {
        let request = self.resolve(scenario, context)?;
        tracing::debug!(
            scenario = scenario.name(),
            method = request.method.as_str(),
            path = request.path.as_str(),
            "issuing request"
        );
        self.client.send(&self.base_url, &request).await
    }

    fn resolve(&self, scenario: &Scenario, context: &RunContext) -> Result<WireRequest, Error> {
        let lookup = |key: &str| context.lookup(key);
        let path = resolve_template(scenario.path_template(), lookup)?;

        let mut headers = Vec::with_capacity(scenario.headers().len() + 2);
        for (name, value) in scenario.headers() {
            headers.push((name.clone(), resolve_template(value, lookup)?));
        }

        let has_header =
            |headers: &[(String, String)], name: &str| headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name));

        if scenario.attaches_session() && !has_header(&headers, SESSION_HEADER) {
            headers.push((
                String::from(SESSION_HEADER),
                String::from(context.session().token()),
            ));
        }
        if let Some(target) = scenario.verb().override_target() {
            headers.push((String::from(METHOD_OVERRIDE_HEADER), String::from(target)));
        }
        if let Some(content_type) = scenario.payload().default_content_type() {
            if !has_header(&headers, "content-type") {
                headers.push((String::from("content-type"), String::from(content_type)));
            }
        }

        // JSON string leaves are templated too: the challenger scenarios
        // send the session token inside the body. XML goes out verbatim.
        let body = match scenario.payload() {
            Payload::Json(value) => {
                Payload::Json(resolve_json_placeholders(value, &lookup)?).to_wire()?
            }
            other => other.to_wire()?,
        };

        Ok(WireRequest {
            method: String::from(scenario.verb().wire_method()),
            path,
            headers,
            body,
        })
    }
}

fn resolve_json_placeholders<F>(value: &Value, lookup: &F) -> Result<Value, Error>
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        Value::String(text) => Ok(Value::String(resolve_template(text, lookup)?)),
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| resolve_json_placeholders(item, lookup))
                .collect::<Result<_, _>>()?,
        )),
        Value::Object(fields) => {
            let mut resolved = serde_json::Map::with_capacity(fields.len());
            for (key, field) in fields {
                resolved.insert(key.clone(), resolve_json_placeholders(field, lookup)?);
            }
            Ok(Value::Object(resolved))
        }
        other => Ok(other.clone()),
    }
}
