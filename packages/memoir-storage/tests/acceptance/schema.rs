use serde_json::json;
use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::search;

#[tokio::test]
#[ignore = "Requires external Postgres. Set MEMOIR_PG_DSN to run."]
async fn schema_bootstrap_is_idempotent() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping schema_bootstrap_is_idempotent; set MEMOIR_PG_DSN to run this test.");

		return;
	};
	let db = super::connect(test_db.dsn()).await;

	// A second bootstrap against a populated database must be a no-op.
	db.ensure_schema().await.expect("Second bootstrap failed.");

	let entity_id = Uuid::new_v4();

	search::replace_entry(
		&db,
		entity_id,
		Uuid::new_v4(),
		SourceKind::Note,
		"title: trip",
		&json!({ "source_kind": "note" }),
	)
	.await
	.expect("Failed to write index entry.");

	let entries = search::entries_for_entity(&db, entity_id).await.expect("Failed to list.");

	assert_eq!(entries.len(), 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
