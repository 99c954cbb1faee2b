use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::db::Db;

use crate::{BoxFuture, Result, adapters};

/// One ordered source fragment. The variant decides how extraction cleans the
/// value before indexing.
#[derive(Clone, Debug)]
pub enum Field {
	Text { label: String, value: String },
	Html { label: String, value: String },
	List { label: String, values: Vec<String> },
}
impl Field {
	pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self::Text { label: label.into(), value: value.into() }
	}

	pub fn html(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self::Html { label: label.into(), value: value.into() }
	}

	pub fn list(label: impl Into<String>, values: Vec<String>) -> Self {
		Self::List { label: label.into(), values }
	}
}

/// A source record flattened into the shape every stage consumes: ownership,
/// identity, the ordered field list, and the AI fields currently on the row.
#[derive(Clone, Debug)]
pub struct SourceDocument {
	pub owner_id: Uuid,
	pub kind: SourceKind,
	pub record_id: Uuid,
	pub fields: Vec<Field>,
	pub tags: Vec<String>,
	pub ai_summary: String,
	pub ai_tags: Vec<String>,
	pub has_embedding: bool,
}

/// Loads one source kind into the common document shape. Adding a kind means
/// one new adapter registered below; no generator changes.
pub trait SourceAdapter
where
	Self: Send + Sync,
{
	fn kind(&self) -> SourceKind;

	/// `None` means the record no longer exists; callers treat that as a
	/// benign skip, never an error.
	fn load<'a>(&'a self, db: &'a Db, record_id: Uuid)
	-> BoxFuture<'a, Result<Option<SourceDocument>>>;
}

pub struct SourceRegistry {
	adapters: Vec<Box<dyn SourceAdapter>>,
}
impl SourceRegistry {
	pub fn with_defaults() -> Self {
		Self {
			adapters: vec![
				Box::new(adapters::ContactAdapter),
				Box::new(adapters::NoteAdapter),
				Box::new(adapters::TaskAdapter),
				Box::new(adapters::LifeEventAdapter),
				Box::new(adapters::ThreadAdapter),
				Box::new(adapters::ThreadMessageAdapter),
			],
		}
	}

	pub fn get(&self, kind: SourceKind) -> Option<&dyn SourceAdapter> {
		self.adapters.iter().find(|adapter| adapter.kind() == kind).map(|adapter| adapter.as_ref())
	}

	pub fn adapters(&self) -> impl Iterator<Item = &dyn SourceAdapter> {
		self.adapters.iter().map(|adapter| adapter.as_ref())
	}
}
