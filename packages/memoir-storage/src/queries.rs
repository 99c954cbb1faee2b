use uuid::Uuid;

use memoir_domain::SourceKind;

use crate::{
	Result,
	db::Db,
	models::{
		Comment, Contact, ContactAddress, ContactCustomField, ContactDate, ContactEmail,
		ContactPhone, ContactRelation, ContactWebsite, FaqEntry, KeywordEntry, LifeEvent, Note,
		TaskRecord, Thread, ThreadMessage,
	},
};

/// Table and primary-key column for each source kind. The SQL below is
/// assembled from these constants, never from caller input.
fn table(kind: SourceKind) -> (&'static str, &'static str) {
	match kind {
		SourceKind::Contact => ("contacts", "contact_id"),
		SourceKind::Note => ("notes", "note_id"),
		SourceKind::Task => ("tasks", "task_id"),
		SourceKind::LifeEvent => ("life_events", "event_id"),
		SourceKind::Thread => ("threads", "thread_id"),
		SourceKind::ThreadMessage => ("thread_messages", "message_id"),
	}
}

pub async fn fetch_contact(db: &Db, id: Uuid) -> Result<Option<Contact>> {
	let row = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE contact_id = $1")
		.bind(id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}

pub async fn fetch_note(db: &Db, id: Uuid) -> Result<Option<Note>> {
	let row = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE note_id = $1")
		.bind(id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}

pub async fn fetch_task(db: &Db, id: Uuid) -> Result<Option<TaskRecord>> {
	let row = sqlx::query_as::<_, TaskRecord>("SELECT * FROM tasks WHERE task_id = $1")
		.bind(id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}

pub async fn fetch_life_event(db: &Db, id: Uuid) -> Result<Option<LifeEvent>> {
	let row = sqlx::query_as::<_, LifeEvent>("SELECT * FROM life_events WHERE event_id = $1")
		.bind(id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}

pub async fn fetch_thread(db: &Db, id: Uuid) -> Result<Option<Thread>> {
	let row = sqlx::query_as::<_, Thread>("SELECT * FROM threads WHERE thread_id = $1")
		.bind(id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}

pub async fn fetch_thread_message(db: &Db, id: Uuid) -> Result<Option<ThreadMessage>> {
	let row =
		sqlx::query_as::<_, ThreadMessage>("SELECT * FROM thread_messages WHERE message_id = $1")
			.bind(id)
			.fetch_optional(&db.pool)
			.await?;

	Ok(row)
}

pub async fn list_ids_for_owner(db: &Db, kind: SourceKind, owner_id: Uuid) -> Result<Vec<Uuid>> {
	let (table, id_column) = table(kind);
	let sql = format!("SELECT {id_column} FROM {table} WHERE owner_id = $1 ORDER BY created_at");
	let ids = sqlx::query_scalar::<_, Uuid>(&sql).bind(owner_id).fetch_all(&db.pool).await?;

	Ok(ids)
}

pub async fn set_ai_summary(db: &Db, kind: SourceKind, id: Uuid, summary: &str) -> Result<()> {
	let (table, id_column) = table(kind);
	let sql =
		format!("UPDATE {table} SET ai_summary = $1, updated_at = now() WHERE {id_column} = $2");

	sqlx::query(&sql).bind(summary).bind(id).execute(&db.pool).await?;

	Ok(())
}

pub async fn set_ai_tags(db: &Db, kind: SourceKind, id: Uuid, tags: &[String]) -> Result<()> {
	let (table, id_column) = table(kind);
	let sql = format!("UPDATE {table} SET ai_tags = $1, updated_at = now() WHERE {id_column} = $2");

	sqlx::query(&sql).bind(tags).bind(id).execute(&db.pool).await?;

	Ok(())
}

pub async fn set_has_embedding(db: &Db, kind: SourceKind, id: Uuid, value: bool) -> Result<()> {
	let (table, id_column) = table(kind);
	let sql =
		format!("UPDATE {table} SET has_embedding = $1, updated_at = now() WHERE {id_column} = $2");

	sqlx::query(&sql).bind(value).bind(id).execute(&db.pool).await?;

	Ok(())
}

pub async fn list_contact_addresses(db: &Db, contact_id: Uuid) -> Result<Vec<ContactAddress>> {
	let rows = sqlx::query_as::<_, ContactAddress>(
		"SELECT * FROM contact_addresses WHERE contact_id = $1",
	)
	.bind(contact_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_contact_emails(db: &Db, contact_id: Uuid) -> Result<Vec<ContactEmail>> {
	let rows =
		sqlx::query_as::<_, ContactEmail>("SELECT * FROM contact_emails WHERE contact_id = $1")
			.bind(contact_id)
			.fetch_all(&db.pool)
			.await?;

	Ok(rows)
}

pub async fn list_contact_phones(db: &Db, contact_id: Uuid) -> Result<Vec<ContactPhone>> {
	let rows =
		sqlx::query_as::<_, ContactPhone>("SELECT * FROM contact_phones WHERE contact_id = $1")
			.bind(contact_id)
			.fetch_all(&db.pool)
			.await?;

	Ok(rows)
}

pub async fn list_contact_websites(db: &Db, contact_id: Uuid) -> Result<Vec<ContactWebsite>> {
	let rows =
		sqlx::query_as::<_, ContactWebsite>("SELECT * FROM contact_websites WHERE contact_id = $1")
			.bind(contact_id)
			.fetch_all(&db.pool)
			.await?;

	Ok(rows)
}

pub async fn list_contact_relations(db: &Db, contact_id: Uuid) -> Result<Vec<ContactRelation>> {
	let rows = sqlx::query_as::<_, ContactRelation>(
		"SELECT * FROM contact_relations WHERE contact_id = $1",
	)
	.bind(contact_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_contact_dates(db: &Db, contact_id: Uuid) -> Result<Vec<ContactDate>> {
	let rows = sqlx::query_as::<_, ContactDate>("SELECT * FROM contact_dates WHERE contact_id = $1")
		.bind(contact_id)
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}

pub async fn list_contact_custom_fields(
	db: &Db,
	contact_id: Uuid,
) -> Result<Vec<ContactCustomField>> {
	let rows = sqlx::query_as::<_, ContactCustomField>(
		"SELECT * FROM contact_custom_fields WHERE contact_id = $1",
	)
	.bind(contact_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_messages_for_thread(db: &Db, thread_id: Uuid) -> Result<Vec<ThreadMessage>> {
	let rows = sqlx::query_as::<_, ThreadMessage>(
		"SELECT * FROM thread_messages WHERE thread_id = $1 ORDER BY created_at",
	)
	.bind(thread_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_comments_for_entity(db: &Db, entity_id: Uuid) -> Result<Vec<Comment>> {
	let rows = sqlx::query_as::<_, Comment>(
		"SELECT * FROM comments WHERE entity_id = $1 ORDER BY created_at",
	)
	.bind(entity_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_faqs_for_source(
	db: &Db,
	owner_id: Uuid,
	kind: SourceKind,
	source_id: Uuid,
) -> Result<Vec<FaqEntry>> {
	let rows = sqlx::query_as::<_, FaqEntry>(
		"\
SELECT *
FROM faq_entries
WHERE owner_id = $1 AND source_kind = $2 AND source_id = $3
ORDER BY created_at",
	)
	.bind(owner_id)
	.bind(kind.as_str())
	.bind(source_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_keywords_for_source(
	db: &Db,
	owner_id: Uuid,
	kind: SourceKind,
	source_id: Uuid,
) -> Result<Vec<KeywordEntry>> {
	let rows = sqlx::query_as::<_, KeywordEntry>(
		"\
SELECT *
FROM keyword_entries
WHERE owner_id = $1 AND source_kind = $2 AND source_id = $3
ORDER BY created_at",
	)
	.bind(owner_id)
	.bind(kind.as_str())
	.bind(source_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

#[derive(Clone, Debug)]
pub struct NewFaqEntry {
	pub question: String,
	pub answer: String,
	pub category: String,
	pub sub_category: String,
	pub tags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct NewKeywordEntry {
	pub keyword: String,
	pub ai_category: String,
	pub ai_sub_category: String,
	pub ai_topic: String,
	pub ai_sub_topic: String,
}

/// Replaces the live FAQ generation for one source record. Delete and insert
/// share one transaction so a failure never leaves zero rows committed.
pub async fn replace_faqs_for_source(
	db: &Db,
	owner_id: Uuid,
	kind: SourceKind,
	source_id: Uuid,
	entries: &[NewFaqEntry],
) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	sqlx::query(
		"DELETE FROM faq_entries WHERE owner_id = $1 AND source_kind = $2 AND source_id = $3",
	)
	.bind(owner_id)
	.bind(kind.as_str())
	.bind(source_id)
	.execute(&mut *tx)
	.await?;

	for entry in entries {
		sqlx::query(
			"\
INSERT INTO faq_entries (
	faq_id,
	owner_id,
	question,
	answer,
	category,
	sub_category,
	tags,
	source_kind,
	source_id
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
		)
		.bind(Uuid::new_v4())
		.bind(owner_id)
		.bind(entry.question.as_str())
		.bind(entry.answer.as_str())
		.bind(entry.category.as_str())
		.bind(entry.sub_category.as_str())
		.bind(&entry.tags)
		.bind(kind.as_str())
		.bind(source_id)
		.execute(&mut *tx)
		.await?;
	}

	tx.commit().await?;

	Ok(())
}

/// Replaces the live keyword generation for one source record, scoped to that
/// record only.
pub async fn replace_keywords_for_source(
	db: &Db,
	owner_id: Uuid,
	kind: SourceKind,
	source_id: Uuid,
	entries: &[NewKeywordEntry],
) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	sqlx::query(
		"DELETE FROM keyword_entries WHERE owner_id = $1 AND source_kind = $2 AND source_id = $3",
	)
	.bind(owner_id)
	.bind(kind.as_str())
	.bind(source_id)
	.execute(&mut *tx)
	.await?;

	for entry in entries {
		sqlx::query(
			"\
INSERT INTO keyword_entries (
	keyword_id,
	owner_id,
	keyword,
	ai_category,
	ai_sub_category,
	ai_topic,
	ai_sub_topic,
	source_kind,
	source_id
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
		)
		.bind(Uuid::new_v4())
		.bind(owner_id)
		.bind(entry.keyword.as_str())
		.bind(entry.ai_category.as_str())
		.bind(entry.ai_sub_category.as_str())
		.bind(entry.ai_topic.as_str())
		.bind(entry.ai_sub_topic.as_str())
		.bind(kind.as_str())
		.bind(source_id)
		.execute(&mut *tx)
		.await?;
	}

	tx.commit().await?;

	Ok(())
}
