use uuid::Uuid;

use memoir_config::Ai;
use memoir_domain::SourceKind;
use memoir_providers::Endpoint;
use memoir_storage::{models::OwnerSettings, settings as owner_settings};

use crate::{Pipeline, Result, registry::SourceDocument};

impl Pipeline {
	/// Resolves the chat endpoint for a record's owner, honoring both the
	/// global AI switch and the per-kind feature flag. `None` means the stage
	/// skips.
	pub(crate) async fn chat_endpoint_for(&self, doc: &SourceDocument) -> Result<Option<Endpoint>> {
		let Some(settings) = owner_settings::fetch_owner_settings(&self.db, doc.owner_id).await?
		else {
			return Ok(None);
		};

		if !kind_enabled(&settings, doc.kind) {
			return Ok(None);
		}

		Ok(chat_endpoint(&self.cfg.ai, &settings))
	}

	/// Embedding is gated on the global switch and a configured embedding
	/// provider only; the per-kind flags scope the chat generators.
	pub(crate) async fn embedding_endpoint_for(&self, owner_id: Uuid) -> Result<Option<Endpoint>> {
		let Some(settings) = owner_settings::fetch_owner_settings(&self.db, owner_id).await? else {
			return Ok(None);
		};

		Ok(embedding_endpoint(&self.cfg.ai, &settings))
	}
}

pub(crate) fn kind_enabled(settings: &OwnerSettings, kind: SourceKind) -> bool {
	if !settings.ai_enabled {
		return false;
	}

	match kind {
		SourceKind::Contact => settings.ai_contacts_enabled,
		SourceKind::Note => settings.ai_notes_enabled,
		SourceKind::Task => settings.ai_tasks_enabled,
		SourceKind::LifeEvent => settings.ai_life_events_enabled,
		SourceKind::Thread | SourceKind::ThreadMessage => settings.ai_threads_enabled,
	}
}

pub(crate) fn chat_endpoint(ai: &Ai, settings: &OwnerSettings) -> Option<Endpoint> {
	if !settings.ai_enabled
		|| settings.chat_provider.is_empty()
		|| settings.chat_api_base.is_empty()
		|| settings.chat_model.is_empty()
	{
		return None;
	}

	Some(Endpoint {
		provider: settings.chat_provider.clone(),
		api_base: settings.chat_api_base.clone(),
		api_key: settings.chat_api_key.clone(),
		model: settings.chat_model.clone(),
		timeout_ms: ai.chat_timeout_ms,
	})
}

pub(crate) fn embedding_endpoint(ai: &Ai, settings: &OwnerSettings) -> Option<Endpoint> {
	if !settings.ai_enabled
		|| settings.embedding_provider.is_empty()
		|| settings.embedding_api_base.is_empty()
		|| settings.embedding_model.is_empty()
	{
		return None;
	}

	Some(Endpoint {
		provider: settings.embedding_provider.clone(),
		api_base: settings.embedding_api_base.clone(),
		api_key: settings.embedding_api_key.clone(),
		model: settings.embedding_model.clone(),
		timeout_ms: ai.embedding_timeout_ms,
	})
}
