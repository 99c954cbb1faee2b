use futures::future;
use uuid::Uuid;

use memoir_storage::search;

use crate::{Pipeline, Result, StageStatus};

impl Pipeline {
	/// Rebuilds the owner's entire search index from scratch and returns how
	/// many records were reindexed.
	///
	/// Records replay in batches so peak concurrency stays bounded by the
	/// configured batch size. A record that fails is logged and the rebuild
	/// moves on; one bad record never aborts the rest.
	pub async fn rebuild_search_index(&self, owner_id: Uuid) -> Result<usize> {
		let removed = search::delete_for_owner(&self.db, owner_id).await?;

		tracing::info!(%owner_id, removed, "Cleared search index for rebuild.");

		let mut targets = Vec::new();

		for adapter in self.registry.adapters() {
			let kind = adapter.kind();

			for id in
				memoir_storage::queries::list_ids_for_owner(&self.db, kind, owner_id).await?
			{
				targets.push((kind, id));
			}
		}

		let batch_size = self.cfg.indexing.rebuild_batch_size.max(1);
		let mut reindexed = 0;

		for batch in targets.chunks(batch_size) {
			let results =
				future::join_all(batch.iter().map(|(kind, id)| self.reindex(*kind, *id))).await;

			for ((kind, id), result) in batch.iter().zip(results) {
				match result {
					Ok(StageStatus::Done) => reindexed += 1,
					Ok(StageStatus::Skipped) => {},
					Err(err) => {
						tracing::warn!(kind = %kind, record_id = %id, "Reindex failed: {err}");
					},
				}
			}
		}

		tracing::info!(%owner_id, reindexed, "Search index rebuild finished.");

		Ok(reindexed)
	}
}
