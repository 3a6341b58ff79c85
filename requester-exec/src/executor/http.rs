use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("request timed out")]
    Timeout,
    #[error("connection error, check proxy settings: {0}")]
    Network(String),
    #[error("http error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Multipart(Vec<FilePart>),
    Form(Vec<(String, String)>),
    Raw(Vec<u8>),
    Json(JsonValue),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase as sent by the server.
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Anything below 400 counts; redirects reqwest did not follow are passed through.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, req: HttpRequest, timeout: Duration) -> Result<HttpResponse, HttpError>;

    /// Drop cookies and pooled connections so the next call starts a fresh session.
    fn new_session(&mut self) -> Result<(), HttpError> {
        Ok(())
    }
}

pub struct ReqwestHttpClient {
    client: reqwest::Client,
    proxies: BTreeMap<String, String>,
}

impl ReqwestHttpClient {
    /// `proxies` maps `http`, `https` or `all` to a proxy URL.
    pub fn new(proxies: BTreeMap<String, String>) -> Result<Self, HttpError> {
        let client = build_client(&proxies)?;
        Ok(Self { client, proxies })
    }
}

const PROXY_ORDER: [&str; 3] = ["http", "https", "all"];

fn build_client(proxies: &BTreeMap<String, String>) -> Result<reqwest::Client, HttpError> {
    let mut builder = reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(concat!("requester/", env!("CARGO_PKG_VERSION")));

    // reqwest takes the first matching proxy, so `all` goes last.
    for scheme in PROXY_ORDER {
        let Some(proxy_url) = proxies.get(scheme) else {
            continue;
        };
        let proxy = match scheme {
            "http" => reqwest::Proxy::http(proxy_url),
            "https" => reqwest::Proxy::https(proxy_url),
            _ => reqwest::Proxy::all(proxy_url),
        }
        .map_err(|e| HttpError::Other(format!("invalid {scheme} proxy: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| HttpError::Other(format!("failed to create HTTP client: {e}")))
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest, timeout: Duration) -> Result<HttpResponse, HttpError> {
        let method = reqwest::Method::from_bytes(req.method.as_bytes())
            .map_err(|e| HttpError::Other(e.to_string()))?;
        let mut rb = self.client.request(method, req.url).timeout(timeout);

        for (k, v) in req.headers {
            rb = rb.header(k, v);
        }
        if !req.query.is_empty() {
            rb = rb.query(&req.query);
        }

        rb = match req.body {
            RequestBody::Empty => rb,
            RequestBody::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    form = form.part(
                        part.field,
                        reqwest::multipart::Part::bytes(part.content).file_name(part.file_name),
                    );
                }
                rb.multipart(form)
            }
            RequestBody::Form(pairs) => rb.form(&pairs),
            RequestBody::Raw(bytes) => rb.body(bytes),
            RequestBody::Json(value) => rb.json(&value),
        };

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status();
        // hyper only records the phrase when it differs from the canonical one.
        let reason = match resp.extensions().get::<hyper::ext::ReasonPhrase>() {
            Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
            None => status.canonical_reason().unwrap_or_default().to_string(),
        };

        let body = resp.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }

    fn new_session(&mut self) -> Result<(), HttpError> {
        self.client = build_client(&self.proxies)?;
        Ok(())
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return HttpError::Network(e.to_string());
    }
    HttpError::Other(e.to_string())
}
