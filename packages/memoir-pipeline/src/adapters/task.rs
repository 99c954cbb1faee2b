use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::{db::Db, queries};

use crate::{
	BoxFuture, Result,
	registry::{Field, SourceAdapter, SourceDocument},
};

pub struct TaskAdapter;

impl SourceAdapter for TaskAdapter {
	fn kind(&self) -> SourceKind {
		SourceKind::Task
	}

	fn load<'a>(
		&'a self,
		db: &'a Db,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<Option<SourceDocument>>> {
		Box::pin(async move {
			let Some(task) = queries::fetch_task(db, record_id).await? else {
				return Ok(None);
			};
			let mut fields = vec![
				Field::text("title", task.title),
				Field::html("description", task.description),
				Field::text("status", task.status),
			];

			if let Some(due_at) = task.due_at {
				fields.push(Field::text("due", due_at.to_string()));
			}

			fields.push(Field::list("tags", task.tags.clone()));

			Ok(Some(SourceDocument {
				owner_id: task.owner_id,
				kind: SourceKind::Task,
				record_id,
				fields,
				tags: task.tags,
				ai_summary: task.ai_summary,
				ai_tags: task.ai_tags,
				has_embedding: task.has_embedding,
			}))
		})
	}
}
