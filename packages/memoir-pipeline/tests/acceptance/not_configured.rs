use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};

use memoir_domain::SourceKind;
use memoir_pipeline::Providers;
use memoir_storage::search;
use uuid::Uuid;

use super::{SpyChat, SpyEmbedding};

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn unconfigured_owner_skips_every_ai_stage() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping unconfigured_owner_skips_every_ai_stage; set MEMOIR_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping unconfigured_owner_skips_every_ai_stage; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let chat_calls = Arc::new(AtomicUsize::new(0));
	let embed_calls = Arc::new(AtomicUsize::new(0));
	let providers = Providers::new(
		Arc::new(SpyChat { payload: super::CHAT_PAYLOAD.to_string(), calls: chat_calls.clone() }),
		Arc::new(SpyEmbedding { dim: 8, calls: embed_calls.clone() }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let owner_id = Uuid::new_v4();
	// No owner_settings row at all.
	let note_id =
		super::seed_note(&pipeline.db.pool, owner_id, "Trip", "<p>Paris</p>", &["travel"]).await;
	let report = pipeline.run(SourceKind::Note, note_id).await;

	// Skips are not failures; the run is clean and no provider was dialed.
	assert!(report.ok());
	assert_eq!(chat_calls.load(Ordering::SeqCst), 0);
	assert_eq!(embed_calls.load(Ordering::SeqCst), 0);

	let note = memoir_storage::queries::fetch_note(&pipeline.db, note_id)
		.await
		.expect("Failed to fetch note.")
		.expect("Note vanished.");

	assert_eq!(note.ai_summary, "");
	assert!(note.ai_tags.is_empty());
	assert!(!note.has_embedding);

	// The search reindex needs no AI configuration and still ran.
	let entries =
		search::entries_for_entity(&pipeline.db, note_id).await.expect("Failed to list entries.");

	assert_eq!(entries.len(), 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn disabled_kind_flag_skips_the_generators() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping disabled_kind_flag_skips_the_generators; set MEMOIR_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping disabled_kind_flag_skips_the_generators; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let chat_calls = Arc::new(AtomicUsize::new(0));
	let providers = Providers::new(
		Arc::new(SpyChat { payload: super::CHAT_PAYLOAD.to_string(), calls: chat_calls.clone() }),
		Arc::new(super::StubEmbedding { dim: 8 }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let owner_id = Uuid::new_v4();

	super::seed_owner_settings(&pipeline.db.pool, owner_id).await;
	sqlx::query("UPDATE owner_settings SET ai_notes_enabled = false WHERE owner_id = $1")
		.bind(owner_id)
		.execute(&pipeline.db.pool)
		.await
		.expect("Failed to update settings.");

	let note_id = super::seed_note(&pipeline.db.pool, owner_id, "Trip", "Paris", &[]).await;
	let summary = pipeline
		.generate_summary(SourceKind::Note, note_id)
		.await
		.expect("Summary stage failed.");

	assert_eq!(summary, memoir_pipeline::StageStatus::Skipped);
	assert_eq!(chat_calls.load(Ordering::SeqCst), 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
