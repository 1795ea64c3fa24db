use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{Error, Result};
use lupa_config::MetadataProviderConfig;

/// Posts one GraphQL operation and returns the full response document.
///
/// A fresh client is built per call; nothing is pooled across calls and nothing is retried.
pub async fn execute(cfg: &MetadataProviderConfig, query: &str, variables: Value) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let body = serde_json::json!({ "query": query, "variables": variables });
	let res = client
		.post(cfg.endpoint())
		.headers(crate::request_headers(&cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;

	// Filter mistakes surface as 400 with a GraphQL error document.
	if res.status() == StatusCode::BAD_REQUEST {
		let json: Value = res.json().await?;

		return Err(response_errors(&json).unwrap_or_else(|| Error::InvalidResponse {
			message: format!("Bad request (400): {json}"),
		}));
	}

	let json: Value = res.error_for_status()?.json().await?;

	if let Some(err) = response_errors(&json) {
		return Err(err);
	}

	Ok(json)
}

fn response_errors(json: &Value) -> Option<Error> {
	let errors = json.get("errors")?.as_array()?;

	if errors.is_empty() {
		return None;
	}

	let messages: Vec<&str> = errors
		.iter()
		.map(|err| err.get("message").and_then(Value::as_str).unwrap_or("Unknown error"))
		.collect();

	Some(Error::GraphQl { message: messages.join("; ") })
}
