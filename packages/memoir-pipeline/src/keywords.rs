use serde_json::Value;
use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_providers::{
	completion::{ChatRequest, ResponseFormat},
	json,
};
use memoir_storage::queries::{self, NewKeywordEntry};

use crate::{Pipeline, Result, StageStatus, extract};

const SYSTEM_PROMPT: &str = "\
You extract retrieval keywords from one personal record. Respond with a JSON \
object of the shape {\"keywords\": [{\"keyword\": \"...\", \"category\": \
\"...\", \"sub_category\": \"...\", \"topic\": \"...\", \"sub_topic\": \
\"...\"}]}. Keywords are short noun phrases present in the record. Return an \
empty array when nothing fits.";

impl Pipeline {
	/// Regenerates the keyword set for exactly one record. The replacement is
	/// scoped to that record, so two notes of the same kind never clobber each
	/// other's keywords.
	pub async fn generate_keywords(&self, kind: SourceKind, record_id: Uuid) -> Result<StageStatus> {
		let Some(adapter) = self.registry.get(kind) else {
			return Ok(StageStatus::Skipped);
		};
		let Some(doc) = adapter.load(&self.db, record_id).await? else {
			tracing::info!(kind = %kind, %record_id, "Record is gone; skipping keywords.");

			return Ok(StageStatus::Skipped);
		};
		let Some(endpoint) = self.chat_endpoint_for(&doc).await? else {
			tracing::info!(kind = %kind, %record_id, "Chat is not configured; skipping keywords.");

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
		let Some(entries) = parse_keywords(&raw, self.cfg.ai.max_keywords) else {
			tracing::warn!(kind = %kind, %record_id, "Chat returned unparseable keywords; skipping.");

			return Ok(StageStatus::Skipped);
		};

		queries::replace_keywords_for_source(&self.db, doc.owner_id, kind, record_id, &entries)
			.await?;

		Ok(StageStatus::Done)
	}
}

fn parse_keywords(raw: &str, cap: usize) -> Option<Vec<NewKeywordEntry>> {
	let value = json::parse_lenient(raw).ok()?;
	let items = value.get("keywords")?.as_array()?;
	let mut entries = Vec::new();

	for item in items {
		let Some(entry) = keyword_of(item) else {
			continue;
		};

		entries.push(entry);

		if entries.len() == cap {
			break;
		}
	}

	Some(entries)
}

fn keyword_of(item: &Value) -> Option<NewKeywordEntry> {
	let keyword = str_field(item, "keyword")?;

	Some(NewKeywordEntry {
		keyword,
		ai_category: str_field(item, "category").unwrap_or_default(),
		ai_sub_category: str_field(item, "sub_category").unwrap_or_default(),
		ai_topic: str_field(item, "topic").unwrap_or_default(),
		ai_sub_topic: str_field(item, "sub_topic").unwrap_or_default(),
	})
}

fn str_field(item: &Value, key: &str) -> Option<String> {
	let trimmed = item.get(key)?.as_str()?.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_string())
}
