//! `gloo-net` implementation of the gateway transport.
//!
//! Client-side (hydrate): real `fetch` calls.
//! Server-side (SSR): every send fails, since backend data is only loaded
//! after hydration.

#![allow(clippy::unused_async)]

use session::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;
            use session::Method;

            let builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Patch => Request::patch(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            let builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            let builder = request.headers.iter().fold(builder, |b, (name, value)| b.header(name, value));

            let sent = match &request.body {
                Some(body) => builder.json(body).map_err(|e| TransportError(e.to_string()))?.send().await,
                None => builder.send().await,
            };
            let response = sent.map_err(|e| TransportError(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError("not available on server".to_owned()))
        }
    }
}
