//! StreamBuddy AI client
//!
//! Recommendations and chat are delegated to a hosted generative model. The
//! external service is never allowed to block or break the UI: every failure
//! path degrades to a cheap local fallback, responses are treated as
//! untrusted payloads, and rate-limit errors are retried with exponential
//! backoff. Results are cached on disk keyed by content id.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

use crate::config;
use crate::models::Content;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Number of suggestions asked of the model, and served by the fallback.
pub const SUGGESTION_COUNT: usize = 3;

pub const OFFLINE_REPLY: &str =
    "I'm offline right now - no AI key is configured. The Trending section is always a safe bet!";
pub const APOLOGY_REPLY: &str = "I'm having a little trouble connecting right now.";
const EMPTY_REPLY: &str = "Check out our trending section!";

/// Error from the generative service or its transport.
#[derive(Debug, Clone)]
pub struct AiError {
    pub status: Option<u16>,
    pub message: String,
}

impl AiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Rate limiting comes back either as HTTP 429 or as a quota complaint
    /// in the error text.
    pub fn is_rate_limit(&self) -> bool {
        if self.status == Some(429) {
            return true;
        }
        let msg = self.message.to_lowercase();
        msg.contains("limit") || msg.contains("quota")
    }
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "HTTP {}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl From<ureq::Error> for AiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => {
                AiError::with_status(code, format!("request failed with status {}", code))
            }
            other => AiError::new(other.to_string()),
        }
    }
}

/// Backoff schedule for `fetch_with_retry`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_secs(3),
            max_jitter: Duration::from_secs(1),
        }
    }
}

/// Run a fallible operation, retrying rate-limit failures with exponential
/// backoff plus jitter. Anything that is not a rate limit propagates
/// immediately. Generic over the operation so every call site shares one
/// schedule.
pub fn fetch_with_retry<T, F>(mut op: F, policy: &RetryPolicy) -> Result<T, AiError>
where
    F: FnMut() -> Result<T, AiError>,
{
    let mut remaining = policy.retries;
    let mut delay = policy.base_delay;

    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if remaining > 0 && err.is_rate_limit() => {
                let jitter = policy.max_jitter.mul_f64(rand::random::<f64>());
                thread::sleep(delay + jitter);
                remaining -= 1;
                delay *= 2;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Seam to the hosted model, so the recommendation logic can be exercised
/// without a network.
pub trait GenerativeBackend: Send + Sync {
    /// Free-text completion.
    fn generate_text(&self, prompt: &str) -> Result<String, AiError>;

    /// Completion constrained to a JSON array of string ids.
    fn generate_ids(&self, prompt: &str) -> Result<Vec<String>, AiError>;
}

/// Backend talking to the hosted Gemini REST endpoint.
pub struct GeminiBackend {
    agent: ureq::Agent,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Build from the `GEMINI_API_KEY` environment variable. Absence of the
    /// credential is not an error - callers degrade to local fallbacks.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(60)))
            .timeout_connect(Some(Duration::from_secs(10)))
            .build()
            .new_agent();

        Some(Self {
            agent,
            api_key,
            model: GEMINI_MODEL.to_string(),
        })
    }

    fn post(&self, body: &Value) -> Result<String, AiError> {
        let url = format!("{}/{}:generateContent", GEMINI_ENDPOINT, self.model);
        let payload = body.to_string();

        let mut response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .send(payload.as_str())?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| AiError::new(format!("read failed: {}", e)))
    }
}

impl GenerativeBackend for GeminiBackend {
    fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let raw = self.post(&body)?;
        extract_candidate_text(&raw)
    }

    fn generate_ids(&self, prompt: &str) -> Result<Vec<String>, AiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        });
        let raw = self.post(&body)?;
        let text = extract_candidate_text(&raw)?;
        Ok(parse_id_array(&text))
    }
}

/// Pull the generated text out of a `generateContent` response.
fn extract_candidate_text(raw: &str) -> Result<String, AiError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| AiError::new(format!("malformed response: {}", e)))?;

    value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AiError::new("response carried no candidate text"))
}

/// Validate the model's output as an array of string ids. Anything else -
/// not JSON, not an array, non-string elements - is treated as empty.
pub fn parse_id_array(text: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => ids.push(s.to_string()),
            None => return Vec::new(),
        }
    }
    ids
}

/// Recommendation and chat front end. The app constructs exactly one of
/// these and shares it, which makes the in-flight guard process-wide.
pub struct Recommender {
    backend: Option<Box<dyn GenerativeBackend>>,
    cache: Mutex<HashMap<String, Vec<String>>>,
    in_flight: AtomicBool,
    policy: RetryPolicy,
    persist: bool,
}

impl Recommender {
    pub fn new(backend: Option<Box<dyn GenerativeBackend>>) -> Self {
        Self {
            backend,
            cache: Mutex::new(config::load_recs_cache()),
            in_flight: AtomicBool::new(false),
            policy: RetryPolicy::default(),
            persist: true,
        }
    }

    /// Detached instance for tests: seeded cache, nothing written to disk.
    #[cfg(test)]
    pub fn detached(
        backend: Option<Box<dyn GenerativeBackend>>,
        cache: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            backend,
            cache: Mutex::new(cache),
            in_flight: AtomicBool::new(false),
            policy: RetryPolicy::default(),
            persist: false,
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// First few other library items: the deterministic fallback used
    /// whenever the external service cannot help.
    pub fn fallback(current: &Content, library: &[Content]) -> Vec<Content> {
        library
            .iter()
            .filter(|c| c.id != current.id)
            .take(SUGGESTION_COUNT)
            .cloned()
            .collect()
    }

    /// Similar-content suggestions for `current`. Cache first, then one
    /// external request guarded by a global single-flight flag; every error
    /// path returns the local fallback.
    pub fn recommendations(&self, current: &Content, library: &[Content]) -> Vec<Content> {
        if let Some(hit) = self.cached(current, library) {
            return hit;
        }

        let Some(backend) = self.backend.as_deref() else {
            return Self::fallback(current, library);
        };

        // Only one recommendation request at a time, app-wide. A concurrent
        // caller gets the fallback instead of a second request.
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Self::fallback(current, library);
        }

        let prompt = recommendation_prompt(current, library);
        let result = fetch_with_retry(|| backend.generate_ids(&prompt), &self.policy);

        // Reset unconditionally so a failed request never wedges the slot.
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(ids) if !ids.is_empty() => {
                self.store(&current.id, &ids);
                let resolved = resolve_ids(&ids, library, Some(&current.id));
                if resolved.is_empty() {
                    Self::fallback(current, library)
                } else {
                    resolved
                }
            }
            _ => Self::fallback(current, library),
        }
    }

    /// Single-turn StreamBuddy chat. The whole library's (title, category)
    /// pairs ride along as context.
    pub fn chat(&self, message: &str, library: &[Content]) -> String {
        let Some(backend) = self.backend.as_deref() else {
            return OFFLINE_REPLY.to_string();
        };

        let prompt = chat_prompt(message, library);
        match fetch_with_retry(|| backend.generate_text(&prompt), &self.policy) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_REPLY.to_string(),
            Err(_) => APOLOGY_REPLY.to_string(),
        }
    }

    fn cached(&self, current: &Content, library: &[Content]) -> Option<Vec<Content>> {
        let cache = self.cache.lock().ok()?;
        let ids = cache.get(&current.id)?;
        let resolved = resolve_ids(ids, library, None);
        if resolved.is_empty() {
            None
        } else {
            Some(resolved)
        }
    }

    fn store(&self, id: &str, ids: &[String]) {
        let Ok(mut cache) = self.cache.lock() else {
            return;
        };
        cache.insert(id.to_string(), ids.to_vec());
        if self.persist {
            config::save_recs_cache(&cache);
        }
    }
}

/// Resolve cached/generated ids against the live library, silently dropping
/// ids that no longer exist. Cached order wins.
fn resolve_ids(ids: &[String], library: &[Content], exclude: Option<&str>) -> Vec<Content> {
    ids.iter()
        .filter(|id| exclude != Some(id.as_str()))
        .filter_map(|id| library.iter().find(|c| &c.id == id))
        .cloned()
        .collect()
}

/// Compact summary for the model: ids, titles and categories only, never
/// full payloads.
fn recommendation_prompt(current: &Content, library: &[Content]) -> String {
    let summary: Vec<Value> = library
        .iter()
        .filter(|c| c.id != current.id)
        .map(|c| json!({ "i": c.id, "t": c.title, "g": c.category }))
        .collect();

    format!(
        "Based on \"{}\" ({}), pick {} similar from this library: {}. \
         Return only a JSON array of the \"i\" values (IDs).",
        current.title,
        current.category,
        SUGGESTION_COUNT,
        Value::Array(summary)
    )
}

fn chat_prompt(message: &str, library: &[Content]) -> String {
    let context = library
        .iter()
        .map(|c| format!("- {} ({})", c.title, c.category))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are \"StreamBuddy\", the AI assistant of a streaming app. Library:\n{}\n\
         User: \"{}\"\nRecommend titles from the library. Friendly and concise.",
        context, message
    )
}
