//! `Backend` implementation on top of the browser `fetch` API.

use chrono::NaiveDate;
use ped_core::endpoint::{decode_body, ApiConfig, Endpoint};
use ped_core::error::{FetchError, FetchResult};
use ped_core::orchestrator::Backend;
use ped_core::session::RecordKey;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Url};

/// Pedestrian backend reached through `window.fetch`.
#[derive(Clone)]
pub struct BrowserBackend {
    config: ApiConfig,
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

impl BrowserBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Absolute URL with the query pairs percent-encoded by `URLSearchParams`.
    fn request_url(endpoint: &Endpoint) -> FetchResult<String> {
        let url = Url::new(&endpoint.url).map_err(|e| FetchError::Transport(js_error(e)))?;
        let params = url.search_params();
        for (name, value) in &endpoint.query {
            params.set(name, value);
        }
        Ok(url.href())
    }

    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<Value> {
        let window = web_sys::window()
            .ok_or_else(|| FetchError::Unavailable("no browser window".to_string()))?;

        let url = Self::request_url(&endpoint)?;
        log::debug!("GET {}", url);

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| FetchError::Transport(js_error(e)))?;

        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| FetchError::Transport(js_error(e)))?;
        let response: Response = response_value
            .dyn_into()
            .map_err(|e| FetchError::Transport(js_error(e)))?;

        let text_promise = response
            .text()
            .map_err(|e| FetchError::Transport(js_error(e)))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|e| FetchError::Transport(js_error(e)))?
            .as_string()
            .unwrap_or_default();

        decode_body(response.status(), &body)
    }
}

impl Backend for BrowserBackend {
    async fn fetch_locations(&self, date: NaiveDate) -> FetchResult<Value> {
        self.get_json(self.config.locations_endpoint(date)).await
    }

    async fn fetch_records(&self, key: &RecordKey) -> FetchResult<Value> {
        self.get_json(self.config.records_endpoint(key)).await
    }
}
