use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};

use memoir_domain::{SourceKind, collection_name};
use memoir_pipeline::{Providers, StageStatus};
use uuid::Uuid;

use super::{SpyEmbedding, StubChat};

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn repeated_embedding_keeps_one_point() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping repeated_embedding_keeps_one_point; set MEMOIR_PG_DSN to run this test.");

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping repeated_embedding_keeps_one_point; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let calls = Arc::new(AtomicUsize::new(0));
	let providers = Providers::new(
		Arc::new(StubChat { payload: super::CHAT_PAYLOAD.to_string() }),
		Arc::new(SpyEmbedding { dim: 8, calls: calls.clone() }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let owner_id = Uuid::new_v4();

	test_db.track_collection(&collection_name(owner_id));
	super::seed_owner_settings(&pipeline.db.pool, owner_id).await;

	let note_id =
		super::seed_note(&pipeline.db.pool, owner_id, "Trip", "<p>Paris</p>", &["travel"]).await;

	for _ in 0..3 {
		let status =
			pipeline.embed_record(SourceKind::Note, note_id).await.expect("Embedding failed.");

		assert_eq!(status, StageStatus::Done);
	}

	assert_eq!(calls.load(Ordering::SeqCst), 3);

	let points = pipeline.vectors.count_points(owner_id).await.expect("Failed to count points.");

	assert_eq!(points, 1);

	let has_embedding =
		sqlx::query_scalar::<_, bool>("SELECT has_embedding FROM notes WHERE note_id = $1")
			.bind(note_id)
			.fetch_one(&pipeline.db.pool)
			.await
			.expect("Failed to read note.");

	assert!(has_embedding);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn distinct_records_get_distinct_points() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping distinct_records_get_distinct_points; set MEMOIR_PG_DSN to run this test.");

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping distinct_records_get_distinct_points; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let providers = Providers::new(
		Arc::new(StubChat { payload: super::CHAT_PAYLOAD.to_string() }),
		Arc::new(super::StubEmbedding { dim: 8 }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let owner_id = Uuid::new_v4();

	test_db.track_collection(&collection_name(owner_id));
	super::seed_owner_settings(&pipeline.db.pool, owner_id).await;

	let first = super::seed_note(&pipeline.db.pool, owner_id, "Trip", "Paris", &[]).await;
	let second = super::seed_note(&pipeline.db.pool, owner_id, "Dinner", "Lyon", &[]).await;

	pipeline.embed_record(SourceKind::Note, first).await.expect("First embedding failed.");
	pipeline.embed_record(SourceKind::Note, second).await.expect("Second embedding failed.");

	let points = pipeline.vectors.count_points(owner_id).await.expect("Failed to count points.");

	assert_eq!(points, 2);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
