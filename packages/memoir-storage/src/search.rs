use serde_json::Value;
use uuid::Uuid;

use memoir_domain::SourceKind;

use crate::{Result, db::Db, models::SearchIndexEntry};

/// Replaces the search-index entry for one record: delete every row with the
/// record's entity id, insert exactly one new row, all in one transaction so
/// a failure cannot leave either zero or two live rows committed.
pub async fn replace_entry(
	db: &Db,
	entity_id: Uuid,
	owner_id: Uuid,
	kind: SourceKind,
	text: &str,
	metadata: &Value,
) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	sqlx::query("DELETE FROM search_index WHERE entity_id = $1")
		.bind(entity_id)
		.execute(&mut *tx)
		.await?;
	sqlx::query(
		"\
INSERT INTO search_index (
	entry_id,
	entity_id,
	owner_id,
	source_kind,
	text,
	metadata,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, now())",
	)
	.bind(Uuid::new_v4())
	.bind(entity_id)
	.bind(owner_id)
	.bind(kind.as_str())
	.bind(text)
	.bind(metadata)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

pub async fn delete_for_owner(db: &Db, owner_id: Uuid) -> Result<u64> {
	let result = sqlx::query("DELETE FROM search_index WHERE owner_id = $1")
		.bind(owner_id)
		.execute(&db.pool)
		.await?;

	Ok(result.rows_affected())
}

pub async fn entries_for_entity(db: &Db, entity_id: Uuid) -> Result<Vec<SearchIndexEntry>> {
	let rows = sqlx::query_as::<_, SearchIndexEntry>(
		"SELECT * FROM search_index WHERE entity_id = $1 ORDER BY updated_at",
	)
	.bind(entity_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn count_for_owner(db: &Db, owner_id: Uuid) -> Result<i64> {
	let count =
		sqlx::query_scalar::<_, i64>("SELECT count(*) FROM search_index WHERE owner_id = $1")
			.bind(owner_id)
			.fetch_one(&db.pool)
			.await?;

	Ok(count)
}
