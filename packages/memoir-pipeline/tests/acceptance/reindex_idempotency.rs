use std::sync::Arc;

use memoir_domain::SourceKind;
use memoir_pipeline::{Providers, StageStatus};
use memoir_storage::search;
use uuid::Uuid;

use super::{StubChat, StubEmbedding};

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn reindex_twice_keeps_exactly_one_row() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping reindex_twice_keeps_exactly_one_row; set MEMOIR_PG_DSN to run this test.");

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping reindex_twice_keeps_exactly_one_row; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let providers = Providers::new(
		Arc::new(StubChat { payload: super::CHAT_PAYLOAD.to_string() }),
		Arc::new(StubEmbedding { dim: 8 }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let owner_id = Uuid::new_v4();
	let note_id =
		super::seed_note(&pipeline.db.pool, owner_id, "Trip", "<p>Paris</p>", &["travel"]).await;

	let first = pipeline.reindex(SourceKind::Note, note_id).await.expect("First reindex failed.");
	let second = pipeline.reindex(SourceKind::Note, note_id).await.expect("Second reindex failed.");

	assert_eq!(first, StageStatus::Done);
	assert_eq!(second, StageStatus::Done);

	let entries =
		search::entries_for_entity(&pipeline.db, note_id).await.expect("Failed to list entries.");

	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].text, "title: trip\ndescription: paris\ntags: travel");
	assert_eq!(entries[0].source_kind, "note");
	assert_eq!(entries[0].owner_id, owner_id);
	assert_eq!(entries[0].metadata["source_kind"], "note");
	assert_eq!(entries[0].metadata["tags"][0], "travel");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn reindex_of_a_missing_record_skips() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping reindex_of_a_missing_record_skips; set MEMOIR_PG_DSN to run this test.");

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping reindex_of_a_missing_record_skips; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let providers = Providers::new(
		Arc::new(StubChat { payload: super::CHAT_PAYLOAD.to_string() }),
		Arc::new(StubEmbedding { dim: 8 }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let status =
		pipeline.reindex(SourceKind::Note, Uuid::new_v4()).await.expect("Reindex failed.");

	assert_eq!(status, StageStatus::Skipped);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
