use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::{db::Db, queries};

use crate::{
	BoxFuture, Result,
	registry::{Field, SourceAdapter, SourceDocument},
};

pub struct NoteAdapter;

impl SourceAdapter for NoteAdapter {
	fn kind(&self) -> SourceKind {
		SourceKind::Note
	}

	fn load<'a>(
		&'a self,
		db: &'a Db,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<Option<SourceDocument>>> {
		Box::pin(async move {
			let Some(note) = queries::fetch_note(db, record_id).await? else {
				return Ok(None);
			};
			let fields = vec![
				Field::text("title", note.title),
				Field::html("description", note.body),
				Field::list("tags", note.tags.clone()),
			];

			Ok(Some(SourceDocument {
				owner_id: note.owner_id,
				kind: SourceKind::Note,
				record_id,
				fields,
				tags: note.tags,
				ai_summary: note.ai_summary,
				ai_tags: note.ai_tags,
				has_embedding: note.has_embedding,
			}))
		})
	}
}
