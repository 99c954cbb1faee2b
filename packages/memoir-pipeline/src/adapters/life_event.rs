use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::{db::Db, queries};

use crate::{
	BoxFuture, Result,
	registry::{Field, SourceAdapter, SourceDocument},
};

pub struct LifeEventAdapter;

impl SourceAdapter for LifeEventAdapter {
	fn kind(&self) -> SourceKind {
		SourceKind::LifeEvent
	}

	fn load<'a>(
		&'a self,
		db: &'a Db,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<Option<SourceDocument>>> {
		Box::pin(async move {
			let Some(event) = queries::fetch_life_event(db, record_id).await? else {
				return Ok(None);
			};
			let mut fields = vec![
				Field::text("title", event.title),
				Field::html("description", event.description),
				Field::text("category", event.category),
			];

			if let Some(occurred_at) = event.occurred_at {
				fields.push(Field::text("occurred", occurred_at.to_string()));
			}

			fields.push(Field::list("tags", event.tags.clone()));

			Ok(Some(SourceDocument {
				owner_id: event.owner_id,
				kind: SourceKind::LifeEvent,
				record_id,
				fields,
				tags: event.tags,
				ai_summary: event.ai_summary,
				ai_tags: event.ai_tags,
				has_embedding: event.has_embedding,
			}))
		})
	}
}
