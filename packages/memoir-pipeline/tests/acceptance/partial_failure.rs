use std::sync::Arc;

use memoir_domain::SourceKind;
use memoir_pipeline::Providers;
use memoir_storage::{queries, search};
use uuid::Uuid;

use super::{FailingEmbedding, StubChat};

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn embedding_failure_does_not_stop_later_stages() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping embedding_failure_does_not_stop_later_stages; set MEMOIR_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping embedding_failure_does_not_stop_later_stages; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let providers = Providers::new(
		Arc::new(StubChat { payload: super::CHAT_PAYLOAD.to_string() }),
		Arc::new(FailingEmbedding),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let owner_id = Uuid::new_v4();

	super::seed_owner_settings(&pipeline.db.pool, owner_id).await;

	let note_id =
		super::seed_note(&pipeline.db.pool, owner_id, "Trip", "<p>Paris</p>", &["travel"]).await;
	let report = pipeline.run(SourceKind::Note, note_id).await;

	assert!(!report.ok());
	assert!(!report.embedding);
	assert!(report.faq);
	assert!(report.summary);
	assert!(report.tags);
	assert!(report.keywords);
	assert!(report.search_reindex);

	let note = queries::fetch_note(&pipeline.db, note_id)
		.await
		.expect("Failed to fetch note.")
		.expect("Note vanished.");

	assert_eq!(note.ai_tags, vec!["travel".to_string(), "paris".to_string()]);
	assert!(!note.has_embedding);

	let keywords =
		queries::list_keywords_for_source(&pipeline.db, owner_id, SourceKind::Note, note_id)
			.await
			.expect("Failed to list keywords.");

	assert_eq!(keywords.len(), 1);

	let entries =
		search::entries_for_entity(&pipeline.db, note_id).await.expect("Failed to list entries.");

	assert_eq!(entries.len(), 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
