use serde_json::Value;

use crate::{Endpoint, Error, Result};

/// Embeds one text blob, returning its vector.
///
/// Local (Ollama) endpoints use the native embed API; everything else speaks
/// the OpenAI-compatible embeddings route.
pub async fn embed(endpoint: &Endpoint, text: &str) -> Result<Vec<f32>> {
	let client = crate::http_client(endpoint.timeout_ms)?;

	if endpoint.is_local() {
		let body = serde_json::json!({ "model": endpoint.model, "input": text });
		let res = client.post(endpoint.url("/api/embed")).json(&body).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		return parse_local_embedding(json);
	}

	let body = serde_json::json!({ "model": endpoint.model, "input": [text] });
	let res = client
		.post(endpoint.url("/v1/embeddings"))
		.headers(crate::auth_headers(&endpoint.api_key)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_hosted_embedding(json)
}

/// Makes sure the model is present on a local endpoint, pulling it on first
/// use. Hosted providers are a no-op.
pub async fn ensure_model(endpoint: &Endpoint) -> Result<()> {
	if !endpoint.is_local() {
		return Ok(());
	}

	let client = crate::http_client(endpoint.timeout_ms)?;
	let res = client.get(endpoint.url("/api/tags")).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	if model_is_present(&json, &endpoint.model) {
		return Ok(());
	}

	let body = serde_json::json!({ "model": endpoint.model, "stream": false });

	client.post(endpoint.url("/api/pull")).json(&body).send().await?.error_for_status()?;

	Ok(())
}

fn model_is_present(tags: &Value, model: &str) -> bool {
	tags.get("models")
		.and_then(|v| v.as_array())
		.map(|models| {
			models.iter().any(|entry| {
				entry
					.get("name")
					.and_then(|name| name.as_str())
					.map(|name| name == model || name.trim_end_matches(":latest") == model)
					.unwrap_or(false)
			})
		})
		.unwrap_or(false)
}

fn parse_local_embedding(json: Value) -> Result<Vec<f32>> {
	let first = json
		.get("embeddings")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Embedding response is missing embeddings array.".to_string(),
		})?;

	vector_from(first)
}

fn parse_hosted_embedding(json: Value) -> Result<Vec<f32>> {
	let first = json
		.get("data")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|item| item.get("embedding"))
		.ok_or_else(|| Error::InvalidResponse {
			message: "Embedding response is missing data array.".to_string(),
		})?;

	vector_from(first)
}

fn vector_from(value: &Value) -> Result<Vec<f32>> {
	let values = value.as_array().ok_or_else(|| Error::InvalidResponse {
		message: "Embedding vector must be an array.".to_string(),
	})?;
	let mut vec = Vec::with_capacity(values.len());

	for value in values {
		let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
			message: "Embedding value must be numeric.".to_string(),
		})?;

		vec.push(number as f32);
	}

	if vec.is_empty() {
		return Err(Error::InvalidResponse { message: "Embedding vector is empty.".to_string() });
	}

	Ok(vec)
}
