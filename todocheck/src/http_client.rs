use crate::data::{ObservedResponse, WireRequest};
use crate::error::Error;
use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{body, Body, HeaderMap, Request};
use hyper_tls::HttpsConnector;
use std::{collections::HashMap, fmt::Debug, str::FromStr, time::Duration};

/// Transport seam. The orchestrator talks to the service exclusively
/// through this trait, so tests can substitute their own transport.
#[async_trait]
pub trait HttpClient: Debug {
    async fn send(&self, base_url: &str, request: &WireRequest)
        -> Result<ObservedResponse, Error>;
}

/// hyper-based client with a global per-call timeout. A timeout or a
/// connection-level failure is a transport error, never an HTTP status;
/// HTTP error statuses come back as ordinary responses because they are
/// valid expected outcomes for many contracts.
#[derive(Debug)]
pub struct HyperHttpClient {
    client: hyper::Client<HttpsConnector<HttpConnector>>,
    timeout: Duration,
}

impl HyperHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: hyper::Client::builder().build(HttpsConnector::new()),
            timeout,
        }
    }

    fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
        // it currently ignores header values with opaque characters
        header_map
            .iter()
            .map(|(k, v)| (String::from(k.as_str()), v.to_str()))
            .filter_map(|(key, value)| value.ok().map(|v| (key, String::from(v))))
            .collect::<HashMap<_, _>>()
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn send(
        &self,
        base_url: &str,
        request_data: &WireRequest,
    ) -> Result<ObservedResponse, Error> {
        let url = format!("{}{}", base_url, request_data.path);
        let mut request_builder = Request::builder()
            .uri(url.as_str())
            .method(request_data.method.as_str());

        if let Some(headers_mut) = request_builder.headers_mut() {
            put_headers(headers_mut, &request_data.headers)?;
        }

        let request: Request<Body> = request_builder.body(request_data.body.clone().into())?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());
        let body = body::to_bytes(response.into_body()).await?;
        let body: String = String::from_utf8_lossy(&body).into();

        Ok(ObservedResponse {
            status,
            headers,
            body,
        })
    }
}

pub(crate) fn put_headers(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: &[(String, String)],
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_str(key.to_lowercase().as_str())
            .map_err(|_| Error::InvalidHeaderName(key.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| Error::InvalidHeaderValue(key.clone()))?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}
