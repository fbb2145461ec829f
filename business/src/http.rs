//! HTTP plumbing shared by the deal-service bindings.
//!
//! On wasm, `reqwest`'s futures are not `Send` because they wrap JS types,
//! while command futures must be `Send` on every target. The wasm path
//! therefore runs the request on the browser task queue via
//! `wasm_bindgen_futures::spawn_local` and hands the reduced, Send-safe
//! result back over a `flume` channel; native awaits `reqwest` directly.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

/// Response reduced to its Send-safe parts.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport failure: the request produced no HTTP response at all.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

/// A request under construction. Obtained from [`Client::get`] / [`Client::post`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Set a JSON body; `content-type` is added when the request is sent.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Send the request. The returned future is `Send` on every target.
    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            execute(self.method, self.url, self.body).await
        }

        #[cfg(target_arch = "wasm32")]
        {
            let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);
            // The reqwest future is not Send; run it on the JS task queue and
            // bridge the result back through the channel, which is.
            wasm_bindgen_futures::spawn_local(async move {
                let result = execute(self.method, self.url, self.body).await;
                let _ = tx.send_async(result).await;
            });
            rx.recv_async()
                .await
                .map_err(|_| HttpError::new("request dropped before completion"))?
        }
    }
}

async fn execute(method: Method, url: String, body: Option<Vec<u8>>) -> HttpResult<Response> {
    let client = reqwest::Client::new();
    let mut request = match method {
        Method::Get => client.get(&url),
        Method::Post => client.post(&url),
    };
    if let Some(body) = body {
        request = request.header("content-type", "application/json").body(body);
    }

    let response = request
        .send()
        .await
        .map_err(|err| HttpError::new(err.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|err| HttpError::new(err.to_string()))?
        .to_vec();

    Ok(Response { status, body })
}

/// Entry point for building requests.
pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }
}
