use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::{db::Db, queries};

use crate::{
	BoxFuture, Result,
	registry::{Field, SourceAdapter, SourceDocument},
};

pub struct ThreadAdapter;

impl SourceAdapter for ThreadAdapter {
	fn kind(&self) -> SourceKind {
		SourceKind::Thread
	}

	// A thread folds its messages in so the whole conversation lands in one
	// index entry and one vector.
	fn load<'a>(
		&'a self,
		db: &'a Db,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<Option<SourceDocument>>> {
		Box::pin(async move {
			let Some(thread) = queries::fetch_thread(db, record_id).await? else {
				return Ok(None);
			};
			let mut fields =
				vec![Field::text("title", thread.title), Field::list("tags", thread.tags.clone())];

			for message in queries::list_messages_for_thread(db, record_id).await? {
				fields.push(Field::html("message", format!("{} {}", message.role, message.content)));
			}

			Ok(Some(SourceDocument {
				owner_id: thread.owner_id,
				kind: SourceKind::Thread,
				record_id,
				fields,
				tags: thread.tags,
				ai_summary: thread.ai_summary,
				ai_tags: thread.ai_tags,
				has_embedding: thread.has_embedding,
			}))
		})
	}
}
