use uuid::Uuid;

use memoir_domain::{SourceKind, point_id};
use memoir_storage::queries;

use crate::{Pipeline, Result, StageStatus, extract};

impl Pipeline {
	/// Embeds one record into its owner's vector collection.
	///
	/// The point id is deterministic, so repeated runs overwrite the same
	/// point instead of accumulating duplicates. Provider failures surface to
	/// the caller; retries happen by queue re-enqueue only.
	pub async fn embed_record(&self, kind: SourceKind, record_id: Uuid) -> Result<StageStatus> {
		let Some(adapter) = self.registry.get(kind) else {
			return Ok(StageStatus::Skipped);
		};
		let Some(doc) = adapter.load(&self.db, record_id).await? else {
			tracing::info!(kind = %kind, %record_id, "Record is gone; skipping embedding.");

			return Ok(StageStatus::Skipped);
		};
		let Some(endpoint) = self.embedding_endpoint_for(doc.owner_id).await? else {
			tracing::info!(kind = %kind, %record_id, "Embedding is not configured; skipping.");

			return Ok(StageStatus::Skipped);
		};
		let related = extract::gather_related(&self.db, &doc).await?;
		let text = extract::extract_text(&doc, &related);

		if text.is_empty() {
			tracing::info!(kind = %kind, %record_id, "Record has no text to embed; skipping.");

			return Ok(StageStatus::Skipped);
		}

		// Local providers pull the model on first use.
		self.providers.embedding.ensure_model(&endpoint).await?;

		let vector = self.providers.embedding.embed(&endpoint, &text).await?;
		let point = point_id(kind, record_id);

		self.vectors.ensure_collection(doc.owner_id, vector.len() as u64).await?;
		self.vectors.upsert_point(doc.owner_id, point, vector, kind, record_id, &text).await?;
		queries::set_has_embedding(&self.db, kind, record_id, true).await?;

		Ok(StageStatus::Done)
	}
}
