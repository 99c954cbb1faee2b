use std::sync::Arc;

use memoir_domain::SourceKind;
use memoir_pipeline::{Providers, StageStatus};
use memoir_storage::queries;
use uuid::Uuid;

use super::{StubChat, StubEmbedding};

const SECOND_PAYLOAD: &str = r#"{
	"faqs": [
		{"question": "Which city?", "answer": "Lyon."},
		{"question": "Which season?", "answer": "Autumn."}
	],
	"keywords": [{"keyword": "lyon", "topic": "travel"}]
}"#;

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set MEMOIR_PG_DSN and MEMOIR_QDRANT_URL to run."]
async fn regeneration_replaces_only_the_records_own_entries() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping regeneration_replaces_only_the_records_own_entries; set MEMOIR_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping regeneration_replaces_only_the_records_own_entries; set MEMOIR_QDRANT_URL to run this test."
		);

		return;
	};
	let providers = Providers::new(
		Arc::new(StubChat { payload: super::CHAT_PAYLOAD.to_string() }),
		Arc::new(StubEmbedding { dim: 8 }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url.clone());
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");
	let owner_id = Uuid::new_v4();

	super::seed_owner_settings(&pipeline.db.pool, owner_id).await;

	let first = super::seed_note(&pipeline.db.pool, owner_id, "Trip", "Paris", &["travel"]).await;
	let second = super::seed_note(&pipeline.db.pool, owner_id, "Dinner", "Lyon", &[]).await;

	for note_id in [first, second] {
		let faq =
			pipeline.generate_faq(SourceKind::Note, note_id).await.expect("FAQ generation failed.");
		let keywords = pipeline
			.generate_keywords(SourceKind::Note, note_id)
			.await
			.expect("Keyword generation failed.");

		assert_eq!(faq, StageStatus::Done);
		assert_eq!(keywords, StageStatus::Done);
	}

	// Regenerate the first note with different output; the second note's
	// entries must survive untouched.
	let providers = Providers::new(
		Arc::new(StubChat { payload: SECOND_PAYLOAD.to_string() }),
		Arc::new(StubEmbedding { dim: 8 }),
	);
	let cfg = super::test_config(test_db.dsn().to_string(), qdrant_url);
	let pipeline = super::build_pipeline(cfg, providers).await.expect("Failed to build pipeline.");

	pipeline.generate_faq(SourceKind::Note, first).await.expect("FAQ regeneration failed.");
	pipeline
		.generate_keywords(SourceKind::Note, first)
		.await
		.expect("Keyword regeneration failed.");

	let first_faqs = queries::list_faqs_for_source(&pipeline.db, owner_id, SourceKind::Note, first)
		.await
		.expect("Failed to list FAQs.");
	let first_keywords =
		queries::list_keywords_for_source(&pipeline.db, owner_id, SourceKind::Note, first)
			.await
			.expect("Failed to list keywords.");

	assert_eq!(first_faqs.len(), 2);
	assert!(first_faqs.iter().all(|faq| faq.question != "Where was the trip?"));
	assert_eq!(first_keywords.len(), 1);
	assert_eq!(first_keywords[0].keyword, "lyon");

	let second_faqs =
		queries::list_faqs_for_source(&pipeline.db, owner_id, SourceKind::Note, second)
			.await
			.expect("Failed to list FAQs.");
	let second_keywords =
		queries::list_keywords_for_source(&pipeline.db, owner_id, SourceKind::Note, second)
			.await
			.expect("Failed to list keywords.");

	assert_eq!(second_faqs.len(), 1);
	assert_eq!(second_faqs[0].question, "Where was the trip?");
	assert_eq!(second_keywords.len(), 1);
	assert_eq!(second_keywords[0].keyword, "paris");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
