use serde_json::Value;
use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_providers::{
	completion::{ChatRequest, ResponseFormat},
	json,
};
use memoir_storage::queries;

use crate::{Pipeline, Result, StageStatus, extract};

const SYSTEM_PROMPT: &str = "\
You label one personal record with topical tags. Respond with a JSON object \
of the shape {\"tags\": [\"...\"]}. Tags are short lowercase phrases drawn \
from the record's content. Return an empty array when nothing fits.";

impl Pipeline {
	pub async fn generate_tags(&self, kind: SourceKind, record_id: Uuid) -> Result<StageStatus> {
		let Some(adapter) = self.registry.get(kind) else {
			return Ok(StageStatus::Skipped);
		};
		let Some(doc) = adapter.load(&self.db, record_id).await? else {
			tracing::info!(kind = %kind, %record_id, "Record is gone; skipping tags.");

			return Ok(StageStatus::Skipped);
		};
		let Some(endpoint) = self.chat_endpoint_for(&doc).await? else {
			tracing::info!(kind = %kind, %record_id, "Chat is not configured; skipping tags.");

			return Ok(StageStatus::Skipped);
		};
		let req = ChatRequest {
			system: SYSTEM_PROMPT.to_string(),
			user: extract::prompt_body(&doc, self.cfg.ai.max_prompt_chars),
			temperature: self.cfg.ai.temperature,
			max_tokens: self.cfg.ai.max_tokens,
			format: ResponseFormat::JsonObject,
		};
		let raw = self.providers.chat.complete(&endpoint, &req).await?;
		let Some(tags) = parse_tags(&raw, self.cfg.ai.max_tags) else {
			// Existing tags stay untouched; the queue may retry the stage.
			tracing::warn!(kind = %kind, %record_id, "Chat returned unparseable tags; skipping.");

			return Ok(StageStatus::Skipped);
		};

		queries::set_ai_tags(&self.db, kind, record_id, &tags).await?;

		Ok(StageStatus::Done)
	}
}

fn parse_tags(raw: &str, cap: usize) -> Option<Vec<String>> {
	let value = json::parse_lenient(raw).ok()?;
	let entries = value.get("tags")?.as_array()?;
	let mut tags = Vec::new();

	for entry in entries {
		if let Some(tag) = string_of(entry) {
			tags.push(tag);
		}
		if tags.len() == cap {
			break;
		}
	}

	Some(tags)
}

fn string_of(value: &Value) -> Option<String> {
	let trimmed = value.as_str()?.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_string())
}
