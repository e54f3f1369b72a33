//! reqwest-backed transport for the real REST service.
//!
//! This file contains the concrete implementation of the `Transport` trait used
//! in production: a single `reqwest::Client` built once with a fixed base
//! address and a cookie store, so the session cookie issued on login is sent
//! back on every later request without application code ever touching it.

use async_trait::async_trait;
use reqwest::{multipart, Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::GatewayError,
    models::{ApiRequest, ApiResponse, Method, RequestBody},
    Transport,
};

pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base_url = parse_base_url(base_url)?;

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| GatewayError::InvalidBaseUrl(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');

        Url::parse(&format!("{base}/{path}")).map_err(|err| GatewayError::Transport {
            path: path.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Accepts absolute `http`/`https` addresses only.
pub fn parse_base_url(raw: &str) -> Result<Url, GatewayError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| GatewayError::InvalidBaseUrl(format!("{raw}: {err}")))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(GatewayError::InvalidBaseUrl(format!(
            "{raw}: expected an http(s) address"
        ))),
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let url = self.endpoint(&request.path)?;
        let path = request.path.clone();
        let transport_error = |err: reqwest::Error| GatewayError::Transport {
            path: path.clone(),
            reason: err.to_string(),
        };

        let mut builder = self
            .client
            .request(reqwest_method(request.method), url.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(fields) => {
                let form = fields
                    .into_iter()
                    .fold(multipart::Form::new(), |form, (name, value)| {
                        form.text(name, value)
                    });
                builder.multipart(form)
            }
            RequestBody::Json(value) => builder.json(&value),
        };

        debug!("{} {}", request.method, url);

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport_error)?;
        let body = decode_body(&bytes);

        let response = ApiResponse { status, body };
        if response.is_success() {
            Ok(response)
        } else {
            Err(GatewayError::Status {
                path: request.path,
                status,
                body: response.body,
            })
        }
    }
}
