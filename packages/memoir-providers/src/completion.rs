use serde_json::Value;

use crate::{Endpoint, Error, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseFormat {
	Text,
	JsonObject,
}

#[derive(Clone, Debug)]
pub struct ChatRequest {
	pub system: String,
	pub user: String,
	pub temperature: f32,
	pub max_tokens: u32,
	pub format: ResponseFormat,
}

/// One chat-completion call. No internal retry; the caller's queue re-enqueues
/// failed stages.
pub async fn complete(endpoint: &Endpoint, req: &ChatRequest) -> Result<String> {
	let client = crate::http_client(endpoint.timeout_ms)?;
	let mut body = serde_json::json!({
		"model": endpoint.model,
		"temperature": req.temperature,
		"max_tokens": req.max_tokens,
		"messages": [
			{ "role": "system", "content": req.system },
			{ "role": "user", "content": req.user },
		],
	});

	if req.format == ResponseFormat::JsonObject {
		body["response_format"] = serde_json::json!({ "type": "json_object" });
	}

	let res = client
		.post(endpoint.url("/v1/chat/completions"))
		.headers(crate::auth_headers(&endpoint.api_key)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_response(json)
}

fn parse_completion_response(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		})?;

	Ok(content.to_string())
}
