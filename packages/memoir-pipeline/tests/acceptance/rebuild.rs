use std::sync::Arc;

use memoir_pipeline::Providers;
use memoir_storage::search;
use uuid::Uuid;

use super::{StubChat, StubEmbedding};

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn rebuild_reindexes_every_record_across_kinds() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping rebuild_reindexes_every_record_across_kinds; set MEMOIR_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping rebuild_reindexes_every_record_across_kinds; set MEMOIR_QDRANT_URL to run this test."
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
	let other_owner = Uuid::new_v4();

	// 25 records across 3 kinds, with the default batch size of 10 this
	// replays in 3 batches.
	for i in 0..10 {
		super::seed_note(&pipeline.db.pool, owner_id, &format!("Note {i}"), "body", &[]).await;
	}
	for i in 0..10 {
		super::seed_task(&pipeline.db.pool, owner_id, &format!("Task {i}")).await;
	}
	for i in 0..5 {
		super::seed_contact(&pipeline.db.pool, owner_id, &format!("Contact{i}")).await;
	}

	// A stale row and another owner's row; the first goes away, the second
	// survives.
	super::seed_note(&pipeline.db.pool, other_owner, "Other", "body", &[]).await;

	let other_note = super::seed_note(&pipeline.db.pool, other_owner, "Keep", "body", &[]).await;

	pipeline.reindex(memoir_domain::SourceKind::Note, other_note).await.expect("Reindex failed.");
	sqlx::query(
		"INSERT INTO search_index (entry_id, entity_id, owner_id, source_kind, text) VALUES ($1, $2, $3, 'note', 'stale')",
	)
	.bind(Uuid::new_v4())
	.bind(Uuid::new_v4())
	.bind(owner_id)
	.execute(&pipeline.db.pool)
	.await
	.expect("Failed to seed stale entry.");

	let reindexed =
		pipeline.rebuild_search_index(owner_id).await.expect("First rebuild failed.");

	assert_eq!(reindexed, 25);
	assert_eq!(
		search::count_for_owner(&pipeline.db, owner_id).await.expect("Failed to count."),
		25
	);
	assert_eq!(
		search::count_for_owner(&pipeline.db, other_owner).await.expect("Failed to count."),
		1
	);

	// Rebuilding again converges on the same state.
	let again = pipeline.rebuild_search_index(owner_id).await.expect("Second rebuild failed.");

	assert_eq!(again, 25);
	assert_eq!(
		search::count_for_owner(&pipeline.db, owner_id).await.expect("Failed to count."),
		25
	);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
