use crate::data::{Payload, Verb, WireRequest};
use crate::error::Error;
use crate::http_client::HttpClient;
use std::sync::Arc;

/// Header carrying the per-run identity token on every call.
pub const SESSION_HEADER: &str = "x-challenger";
/// Header carrying the secondary bearer-style token for the secret note.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

const SESSION_ENDPOINT: &str = "/challenger";
const SECRET_TOKEN_ENDPOINT: &str = "/secret/token";

/// Per-run identity. Created once before any scenario runs, passed by
/// reference into every execution, discarded at run end. Two acquisitions
/// yield two independent tokens.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    auth_token: Option<String>,
}

impl Session {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
            auth_token: None,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn set_auth_token<S: Into<String>>(&mut self, token: S) {
        self.auth_token = Some(token.into());
    }
}

/// HTTP Basic credentials for the secondary token exchange.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    user: String,
    password: String,
}

impl BasicCredentials {
    pub fn new<U: Into<String>, P: Into<String>>(user: U, password: P) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn authorization_value(&self) -> String {
        format!(
            "Basic {}",
            base64::encode(format!("{}:{}", self.user, self.password))
        )
    }
}

/// Acquires identity tokens from the service at run start.
#[derive(Debug)]
pub struct SessionManager {
    client: Arc<dyn HttpClient + Send + Sync>,
    base_url: String,
}

impl SessionManager {
    pub fn new<S: Into<String>>(client: Arc<dyn HttpClient + Send + Sync>, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Bootstraps a session: `POST /challenger`, expecting 201 and the
    /// identity header. Anything else is a hard failure of the run.
    pub async fn acquire(&self) -> Result<Session, Error> {
        let request = WireRequest {
            method: String::from(Verb::Post.wire_method()),
            path: String::from(SESSION_ENDPOINT),
            headers: Vec::new(),
            body: Payload::Empty.to_wire()?,
        };
        let response = self.client.send(&self.base_url, &request).await?;

        if response.status != 201 {
            return Err(Error::SessionAcquisition(format!(
                "expected 201 from POST {}, got {}",
                SESSION_ENDPOINT, response.status
            )));
        }
        match response.header(SESSION_HEADER) {
            Some(token) if !token.is_empty() => Ok(Session::new(token)),
            _ => Err(Error::SessionAcquisition(format!(
                "response omitted the {} header",
                SESSION_HEADER
            ))),
        }
    }

    /// Exchanges Basic credentials for the secondary token
    /// (`POST /secret/token` → `x-auth-token`). 401/403 is an auth error.
    pub async fn acquire_secondary_token(
        &self,
        session: &Session,
        credentials: &BasicCredentials,
    ) -> Result<String, Error> {
        let request = WireRequest {
            method: String::from(Verb::Post.wire_method()),
            path: String::from(SECRET_TOKEN_ENDPOINT),
            headers: vec![
                (String::from(SESSION_HEADER), String::from(session.token())),
                (
                    String::from("authorization"),
                    credentials.authorization_value(),
                ),
            ],
            body: Payload::Empty.to_wire()?,
        };
        let response = self.client.send(&self.base_url, &request).await?;

        match response.status {
            401 | 403 => Err(Error::Auth(response.status)),
            201 => match response.header(AUTH_TOKEN_HEADER) {
                Some(token) if !token.is_empty() => Ok(String::from(token)),
                _ => Err(Error::SessionAcquisition(format!(
                    "response omitted the {} header",
                    AUTH_TOKEN_HEADER
                ))),
            },
            other => Err(Error::SessionAcquisition(format!(
                "expected 201 from POST {}, got {}",
                SECRET_TOKEN_ENDPOINT, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_credentials_encode_per_rfc7617() {
        let credentials = BasicCredentials::new("admin", "password");
        assert_eq!(
            credentials.authorization_value(),
            "Basic YWRtaW46cGFzc3dvcmQ="
        );
    }

    #[test]
    fn a_session_starts_without_a_secondary_token() {
        let mut session = Session::new("abc");
        assert_eq!(session.token(), "abc");
        assert!(session.auth_token().is_none());
        session.set_auth_token("secret");
        assert_eq!(session.auth_token(), Some("secret"));
    }
}
