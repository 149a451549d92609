// ============================================================
// Layer 5 — Remote Model (HTTP backend)
// ============================================================
// Calls a hosted text2text-generation endpoint (for instance a
// T5 model fine-tuned for answer-aware question generation)
// using the Hugging Face inference request shape:
//
//   POST <endpoint>
//   { "inputs": "<prompt>",
//     "parameters": { "max_new_tokens": 100, "num_beams": 4,
//                     "temperature": 0.7, "top_p": 0.9,
//                     "do_sample": true } }
//
// Accepted responses:
//   [ { "generated_text": "..." } ]   or   { "generated_text": "..." }
//
// Failures map onto GenerationError:
//   request timed out          → Timeout (the synthesizer skips)
//   connection refused / DNS   → Unavailable
//   non-2xx or unexpected body → Inference
//
// Calls are blocking, one per candidate. Callers that need the
// run off the main thread wrap the whole generation themselves.
//
// Reference: reqwest::blocking documentation

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::domain::traits::{GenerationError, GenerationParams, QuestionModel};

pub struct RemoteModel {
    client:   Client,
    endpoint: String,
    token:    Option<String>,
    timeout:  Duration,
}

impl RemoteModel {
    pub fn new(endpoint: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Cannot build HTTP client for the generation endpoint")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
            timeout,
        })
    }

    fn classify(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else if e.is_connect() {
            GenerationError::Unavailable(format!("{}: {e}", self.endpoint))
        } else {
            GenerationError::Inference(e.to_string())
        }
    }
}

impl QuestionModel for RemoteModel {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, GenerationError> {
        let mut request = self.client.post(&self.endpoint).json(&request_body(prompt, params));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| self.classify(e))?;
        let status   = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Inference(format!("endpoint returned {status}: {body}")));
        }

        let body: Value = response.json().map_err(|e| self.classify(e))?;
        generated_text(&body).ok_or_else(|| {
            GenerationError::Inference(format!("no generated_text in response: {body}"))
        })
    }
}

/// JSON payload for one generation call.
pub fn request_body(prompt: &str, params: &GenerationParams) -> Value {
    json!({
        "inputs": prompt,
        "parameters": {
            "max_new_tokens": params.max_output_len,
            "num_beams":      params.num_beams,
            "temperature":    params.temperature,
            "top_p":          params.top_p,
            "do_sample":      true,
        },
        "options": { "wait_for_model": true },
    })
}

/// Pull the generated text out of either response shape.
pub fn generated_text(body: &Value) -> Option<String> {
    let item = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    item.get("generated_text")
        .and_then(Value::as_str)
        .map(str::to_string)
}
