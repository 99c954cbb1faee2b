use serde_json::Value;
use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_providers::{
	completion::{ChatRequest, ResponseFormat},
	json,
};
use memoir_storage::queries::{self, NewFaqEntry};

use crate::{Pipeline, Result, StageStatus, extract};

const SYSTEM_PROMPT: &str = "\
You turn one personal record into question-and-answer pairs a user might ask \
about it later. Respond with a JSON object of the shape {\"faqs\": \
[{\"question\": \"...\", \"answer\": \"...\", \"category\": \"...\", \
\"sub_category\": \"...\", \"tags\": [\"...\"]}]}. Answers come only from \
the record's content. Return an empty array when the record is too thin.";

impl Pipeline {
	pub async fn generate_faq(&self, kind: SourceKind, record_id: Uuid) -> Result<StageStatus> {
		let Some(adapter) = self.registry.get(kind) else {
			return Ok(StageStatus::Skipped);
		};
		let Some(doc) = adapter.load(&self.db, record_id).await? else {
			tracing::info!(kind = %kind, %record_id, "Record is gone; skipping FAQ.");

			return Ok(StageStatus::Skipped);
		};
		let Some(endpoint) = self.chat_endpoint_for(&doc).await? else {
			tracing::info!(kind = %kind, %record_id, "Chat is not configured; skipping FAQ.");

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
		let Some(entries) = parse_faqs(&raw, self.cfg.ai.max_faq_entries) else {
			// The previous generation stays live when parsing fails.
			tracing::warn!(kind = %kind, %record_id, "Chat returned unparseable FAQs; skipping.");

			return Ok(StageStatus::Skipped);
		};

		queries::replace_faqs_for_source(&self.db, doc.owner_id, kind, record_id, &entries).await?;

		Ok(StageStatus::Done)
	}
}

fn parse_faqs(raw: &str, cap: usize) -> Option<Vec<NewFaqEntry>> {
	let value = json::parse_lenient(raw).ok()?;
	let items = value.get("faqs")?.as_array()?;
	let mut entries = Vec::new();

	for item in items {
		let Some(entry) = faq_of(item) else {
			continue;
		};

		entries.push(entry);

		if entries.len() == cap {
			break;
		}
	}

	Some(entries)
}

fn faq_of(item: &Value) -> Option<NewFaqEntry> {
	let question = str_field(item, "question")?;
	let answer = str_field(item, "answer")?;
	let category = str_field(item, "category").unwrap_or_default();
	let sub_category = str_field(item, "sub_category").unwrap_or_default();
	let tags = item
		.get("tags")
		.and_then(|v| v.as_array())
		.map(|values| {
			values
				.iter()
				.filter_map(|v| v.as_str())
				.map(|s| s.trim().to_string())
				.filter(|s| !s.is_empty())
				.collect()
		})
		.unwrap_or_default();

	Some(NewFaqEntry { question, answer, category, sub_category, tags })
}

fn str_field(item: &Value, key: &str) -> Option<String> {
	let trimmed = item.get(key)?.as_str()?.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_string())
}
