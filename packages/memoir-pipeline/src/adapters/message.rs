use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::{db::Db, queries};

use crate::{
	BoxFuture, Result,
	registry::{Field, SourceAdapter, SourceDocument},
};

pub struct ThreadMessageAdapter;

impl SourceAdapter for ThreadMessageAdapter {
	fn kind(&self) -> SourceKind {
		SourceKind::ThreadMessage
	}

	fn load<'a>(
		&'a self,
		db: &'a Db,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<Option<SourceDocument>>> {
		Box::pin(async move {
			let Some(message) = queries::fetch_thread_message(db, record_id).await? else {
				return Ok(None);
			};
			let fields = vec![
				Field::text("role", message.role),
				Field::html("content", message.content),
				Field::list("tags", message.tags.clone()),
			];

			Ok(Some(SourceDocument {
				owner_id: message.owner_id,
				kind: SourceKind::ThreadMessage,
				record_id,
				fields,
				tags: message.tags,
				ai_summary: message.ai_summary,
				ai_tags: message.ai_tags,
				has_embedding: message.has_embedding,
			}))
		})
	}
}
