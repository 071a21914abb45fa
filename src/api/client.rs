use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// HTTP client for the provisioning backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one request and return the parsed JSON body.
    ///
    /// Non-2xx statuses become [`ApiError::Status`] with the body's
    /// `error`/`message`/`detail` text when present. An empty 2xx body is `null`.
    pub async fn call(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<Value>,
        params: Option<Vec<(String, String)>>,
    ) -> Result<Value, ApiError> {
        log_request(&self.base_url, &self.api_token, method, endpoint, body.as_ref(), params.as_deref());

        let url = format!("{}{}", self.base_url, endpoint);
        let mut req = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            _ => self.client.get(&url),
        };

        if !self.api_token.is_empty() {
            req = req.header("API-Token", &self.api_token);
        }

        if let Some(ref p) = params {
            req = req.query(p);
        }

        if let Some(ref b) = body {
            req = req.json(b);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let parsed: Result<Value, _> = if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str(&text)
        };

        let response_str = Paint::new(&text).rgb(100, 100, 100).to_string();
        log_output(format!("Response ({}):\n{}", status.as_u16(), response_str));

        if !status.is_success() {
            let message = parsed.ok().as_ref().and_then(error_message_from_body);
            return Err(ApiError::Status { status: status.as_u16(), message });
        }
        parsed.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull a human readable error out of a JSON error body.
pub fn error_message_from_body(body: &Value) -> Option<String> {
    ["error", "message", "detail"]
        .iter()
        .find_map(|k| body.get(*k).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn log_request(
    base_url: &str,
    api_token: &str,
    method: &str,
    endpoint: &str,
    body: Option<&Value>,
    params: Option<&[(String, String)]>,
) {
    let mut url_for_log = format!("{}{}", base_url, endpoint);
    if let Some(p) = params {
        if !p.is_empty() {
            url_for_log = format!("{}?{}", url_for_log, crate::utils::build_query_string(p));
        }
    }

    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));

    if !api_token.is_empty() {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'API-Token: ***'").fg(yansi::Color::Magenta)
        ));
    }
    if let Some(d) = body {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!("{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
}
