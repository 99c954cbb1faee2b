use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{Result, db::Db, models::PendingTask};

/// Enqueues one unit of work for the worker. Retry happens by re-enqueue of
/// the same row, never inside the pipeline.
pub async fn enqueue(db: &Db, owner_id: Uuid, target_id: Uuid, task_kind: &str) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO pending_tasks (task_id, owner_id, target_id, task_kind, status)
VALUES ($1, $2, $3, $4, 'PENDING')",
	)
	.bind(Uuid::new_v4())
	.bind(owner_id)
	.bind(target_id)
	.bind(task_kind)
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Claims the next due task, extending its lease so concurrent workers skip
/// it. `FOR UPDATE SKIP LOCKED` keeps claims contention-free.
pub async fn fetch_next(
	db: &Db,
	now: OffsetDateTime,
	lease_seconds: i64,
) -> Result<Option<PendingTask>> {
	let mut tx = db.pool.begin().await?;
	let row = sqlx::query_as::<_, PendingTask>(
		"\
SELECT *
FROM pending_tasks
WHERE status IN ('PENDING', 'FAILED') AND available_at <= $1
ORDER BY available_at
LIMIT 1
FOR UPDATE SKIP LOCKED",
	)
	.bind(now)
	.fetch_optional(&mut *tx)
	.await?;
	let task = if let Some(mut task) = row {
		let lease_until = now + Duration::seconds(lease_seconds);

		sqlx::query("UPDATE pending_tasks SET available_at = $1, updated_at = $2 WHERE task_id = $3")
			.bind(lease_until)
			.bind(now)
			.bind(task.task_id)
			.execute(&mut *tx)
			.await?;

		task.available_at = lease_until;
		task.updated_at = now;

		Some(task)
	} else {
		None
	};

	tx.commit().await?;

	Ok(task)
}

pub async fn mark_done(db: &Db, task_id: Uuid) -> Result<()> {
	sqlx::query("UPDATE pending_tasks SET status = 'DONE', updated_at = $1 WHERE task_id = $2")
		.bind(OffsetDateTime::now_utc())
		.bind(task_id)
		.execute(&db.pool)
		.await?;

	Ok(())
}

/// Re-enqueues a failed task with its backoff delay and a sanitized error.
pub async fn mark_failed(
	db: &Db,
	task_id: Uuid,
	attempts: i32,
	backoff: Duration,
	error_text: &str,
) -> Result<()> {
	let now = OffsetDateTime::now_utc();

	sqlx::query(
		"\
UPDATE pending_tasks
SET status = 'FAILED',
	attempts = $1,
	last_error = $2,
	available_at = $3,
	updated_at = $4
WHERE task_id = $5",
	)
	.bind(attempts)
	.bind(error_text)
	.bind(now + backoff)
	.bind(now)
	.bind(task_id)
	.execute(&db.pool)
	.await?;

	Ok(())
}
