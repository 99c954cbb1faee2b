use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_providers::completion::{ChatRequest, ResponseFormat};
use memoir_storage::queries;

use crate::{Pipeline, Result, StageStatus, extract};

const SYSTEM_PROMPT: &str = "\
You summarize one personal record. Write a single short paragraph in plain \
prose capturing what the record is about and any dates, people, or places it \
mentions. Do not invent facts that are not in the record.";

impl Pipeline {
	pub async fn generate_summary(&self, kind: SourceKind, record_id: Uuid) -> Result<StageStatus> {
		let Some(adapter) = self.registry.get(kind) else {
			return Ok(StageStatus::Skipped);
		};
		let Some(doc) = adapter.load(&self.db, record_id).await? else {
			tracing::info!(kind = %kind, %record_id, "Record is gone; skipping summary.");

			return Ok(StageStatus::Skipped);
		};
		let Some(endpoint) = self.chat_endpoint_for(&doc).await? else {
			tracing::info!(kind = %kind, %record_id, "Chat is not configured; skipping summary.");

			return Ok(StageStatus::Skipped);
		};
		let req = ChatRequest {
			system: SYSTEM_PROMPT.to_string(),
			user: extract::prompt_body(&doc, self.cfg.ai.max_prompt_chars),
			temperature: self.cfg.ai.temperature,
			max_tokens: self.cfg.ai.max_tokens,
			format: ResponseFormat::Text,
		};
		let raw = self.providers.chat.complete(&endpoint, &req).await?;
		let summary = raw.trim();

		if summary.is_empty() {
			tracing::warn!(kind = %kind, %record_id, "Chat returned an empty summary; skipping.");

			return Ok(StageStatus::Skipped);
		}

		queries::set_ai_summary(&self.db, kind, record_id, summary).await?;

		Ok(StageStatus::Done)
	}
}
