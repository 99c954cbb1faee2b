use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use memoir_storage::tasks;

#[tokio::test]
#[ignore = "Requires external Postgres. Set MEMOIR_PG_DSN to run."]
async fn claimed_tasks_are_leased_and_retries_reenqueue() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping claimed_tasks_are_leased_and_retries_reenqueue; set MEMOIR_PG_DSN to run this test."
		);

		return;
	};
	let db = super::connect(test_db.dsn()).await;
	let owner_id = Uuid::new_v4();
	let target_id = Uuid::new_v4();

	tasks::enqueue(&db, owner_id, target_id, "pipeline:note").await.expect("Enqueue failed.");

	let now = OffsetDateTime::now_utc();
	let task = tasks::fetch_next(&db, now, 30)
		.await
		.expect("First claim failed.")
		.expect("Expected a due task.");

	assert_eq!(task.owner_id, owner_id);
	assert_eq!(task.target_id, target_id);
	assert_eq!(task.task_kind, "pipeline:note");
	assert!(task.available_at > now);

	// The lease hides the row from a second worker polling at the same time.
	let contended = tasks::fetch_next(&db, now, 30).await.expect("Second claim failed.");

	assert!(contended.is_none());

	// A failure re-enqueues with its backoff; a zero backoff is due at once.
	tasks::mark_failed(&db, task.task_id, 1, Duration::ZERO, "Provider error.")
		.await
		.expect("mark_failed failed.");

	let retried = tasks::fetch_next(&db, OffsetDateTime::now_utc(), 30)
		.await
		.expect("Reclaim failed.")
		.expect("Expected the failed task to be due again.");

	assert_eq!(retried.task_id, task.task_id);
	assert_eq!(retried.attempts, 1);
	assert_eq!(retried.last_error.as_deref(), Some("Provider error."));

	tasks::mark_done(&db, task.task_id).await.expect("mark_done failed.");

	let drained = tasks::fetch_next(&db, OffsetDateTime::now_utc() + Duration::seconds(60), 30)
		.await
		.expect("Final claim failed.");

	assert!(drained.is_none());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
