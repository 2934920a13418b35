//! Network fetching utilities.
//!
//! Thin wrappers over the browser Fetch API. No timeout is imposed: a hung
//! request simply never resolves.

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, RequestMode, Response};

use crate::core::error::FetchError;

/// HTTP cache behavior for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheMode {
    /// Use any cached response, however stale (directory listings)
    ForceCache,
    /// Always revalidate with the server (documents, site config)
    NoCache,
}

impl From<CacheMode> for RequestCache {
    fn from(mode: CacheMode) -> Self {
        match mode {
            CacheMode::ForceCache => RequestCache::ForceCache,
            CacheMode::NoCache => RequestCache::NoCache,
        }
    }
}

/// Fetch and parse JSON from a URL.
pub async fn fetch_json<T: DeserializeOwned>(url: &str, cache: CacheMode) -> Result<T, FetchError> {
    let text = fetch_url(url, cache).await?;
    serde_json::from_str(&text).map_err(|e| FetchError::JsonParseError(e.to_string()))
}

/// Fetch text content from a URL.
pub async fn fetch_text(url: &str, cache: CacheMode) -> Result<String, FetchError> {
    fetch_url(url, cache).await
}

/// Best-effort message for a rejected fetch promise.
fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "Unknown error".to_string())
}

async fn fetch_url(url: &str, cache: CacheMode) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_cache(cache.into());

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let result = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::NetworkError(describe(&e)))?;
    let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

    if !resp.ok() {
        return Err(FetchError::HttpError(resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;

    text.as_string().ok_or(FetchError::InvalidContent)
}
