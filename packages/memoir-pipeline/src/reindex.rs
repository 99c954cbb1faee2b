use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::search;

use crate::{Pipeline, Result, StageStatus, extract};

impl Pipeline {
	/// Rebuilds the full-text index entry for one record.
	///
	/// Idempotent: the delete and the single insert share one transaction, so
	/// the index never holds zero or two live rows for the record. Runs
	/// without any AI configuration; the index is useful on its own.
	pub async fn reindex(&self, kind: SourceKind, record_id: Uuid) -> Result<StageStatus> {
		let Some(adapter) = self.registry.get(kind) else {
			return Ok(StageStatus::Skipped);
		};
		let Some(doc) = adapter.load(&self.db, record_id).await? else {
			tracing::info!(kind = %kind, %record_id, "Record is gone; skipping reindex.");

			return Ok(StageStatus::Skipped);
		};
		let related = extract::gather_related(&self.db, &doc).await?;
		let text = extract::extract_text(&doc, &related);
		let metadata = extract::metadata_filters(&doc);

		search::replace_entry(&self.db, record_id, doc.owner_id, kind, &text, &metadata).await?;

		Ok(StageStatus::Done)
	}
}
