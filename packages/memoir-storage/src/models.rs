use serde_json::Value;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct Contact {
	pub contact_id: Uuid,
	pub owner_id: Uuid,
	pub first_name: String,
	pub last_name: String,
	pub nickname: String,
	pub company: String,
	pub job_title: String,
	pub notes: String,
	pub tags: Vec<String>,
	pub ai_summary: String,
	pub ai_tags: Vec<String>,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct Note {
	pub note_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub body: String,
	pub tags: Vec<String>,
	pub ai_summary: String,
	pub ai_tags: Vec<String>,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TaskRecord {
	pub task_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub description: String,
	pub status: String,
	pub due_at: Option<OffsetDateTime>,
	pub tags: Vec<String>,
	pub ai_summary: String,
	pub ai_tags: Vec<String>,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct LifeEvent {
	pub event_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub description: String,
	pub category: String,
	pub occurred_at: Option<OffsetDateTime>,
	pub tags: Vec<String>,
	pub ai_summary: String,
	pub ai_tags: Vec<String>,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct Thread {
	pub thread_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub tags: Vec<String>,
	pub ai_summary: String,
	pub ai_tags: Vec<String>,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ThreadMessage {
	pub message_id: Uuid,
	pub thread_id: Uuid,
	pub owner_id: Uuid,
	pub role: String,
	pub content: String,
	pub tags: Vec<String>,
	pub ai_summary: String,
	pub ai_tags: Vec<String>,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContactAddress {
	pub address_id: Uuid,
	pub contact_id: Uuid,
	pub label: String,
	pub street: String,
	pub city: String,
	pub region: String,
	pub postal_code: String,
	pub country: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContactEmail {
	pub email_id: Uuid,
	pub contact_id: Uuid,
	pub label: String,
	pub address: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContactPhone {
	pub phone_id: Uuid,
	pub contact_id: Uuid,
	pub label: String,
	pub number: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContactWebsite {
	pub website_id: Uuid,
	pub contact_id: Uuid,
	pub label: String,
	pub url: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContactRelation {
	pub relation_id: Uuid,
	pub contact_id: Uuid,
	pub name: String,
	pub relation: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContactDate {
	pub date_id: Uuid,
	pub contact_id: Uuid,
	pub label: String,
	pub occurred_on: Option<Date>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContactCustomField {
	pub field_id: Uuid,
	pub contact_id: Uuid,
	pub name: String,
	pub value: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct Comment {
	pub comment_id: Uuid,
	pub owner_id: Uuid,
	pub entity_id: Uuid,
	pub body: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct FaqEntry {
	pub faq_id: Uuid,
	pub owner_id: Uuid,
	pub question: String,
	pub answer: String,
	pub category: String,
	pub sub_category: String,
	pub tags: Vec<String>,
	pub source_kind: String,
	pub source_id: Uuid,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct KeywordEntry {
	pub keyword_id: Uuid,
	pub owner_id: Uuid,
	pub keyword: String,
	pub ai_category: String,
	pub ai_sub_category: String,
	pub ai_topic: String,
	pub ai_sub_topic: String,
	pub source_kind: String,
	pub source_id: Uuid,
	pub has_embedding: bool,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SearchIndexEntry {
	pub entry_id: Uuid,
	pub entity_id: Uuid,
	pub owner_id: Uuid,
	pub source_kind: String,
	pub text: String,
	pub metadata: Value,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct OwnerSettings {
	pub owner_id: Uuid,
	pub ai_enabled: bool,
	pub ai_contacts_enabled: bool,
	pub ai_notes_enabled: bool,
	pub ai_tasks_enabled: bool,
	pub ai_life_events_enabled: bool,
	pub ai_threads_enabled: bool,
	pub chat_provider: String,
	pub chat_api_base: String,
	pub chat_api_key: String,
	pub chat_model: String,
	pub embedding_provider: String,
	pub embedding_api_base: String,
	pub embedding_api_key: String,
	pub embedding_model: String,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct PendingTask {
	pub task_id: Uuid,
	pub owner_id: Uuid,
	pub target_id: Uuid,
	pub task_kind: String,
	pub status: String,
	pub attempts: i32,
	pub last_error: Option<String>,
	pub available_at: OffsetDateTime,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
