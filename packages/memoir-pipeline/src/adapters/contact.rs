use uuid::Uuid;

use memoir_domain::SourceKind;
use memoir_storage::{db::Db, queries};

use crate::{
	BoxFuture, Result,
	registry::{Field, SourceAdapter, SourceDocument},
};

pub struct ContactAdapter;

impl SourceAdapter for ContactAdapter {
	fn kind(&self) -> SourceKind {
		SourceKind::Contact
	}

	// Contacts fan in seven structured child tables on top of the row itself.
	fn load<'a>(
		&'a self,
		db: &'a Db,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<Option<SourceDocument>>> {
		Box::pin(async move {
			let Some(contact) = queries::fetch_contact(db, record_id).await? else {
				return Ok(None);
			};
			let mut fields = vec![
				Field::text("name", format!("{} {}", contact.first_name, contact.last_name)),
				Field::text("nickname", contact.nickname),
				Field::text("company", contact.company),
				Field::text("job title", contact.job_title),
				Field::html("notes", contact.notes),
				Field::list("tags", contact.tags.clone()),
			];

			for address in queries::list_contact_addresses(db, record_id).await? {
				fields.push(Field::text(
					"address",
					format!(
						"{} {} {} {} {}",
						address.street, address.city, address.region, address.postal_code,
						address.country
					),
				));
			}
			for email in queries::list_contact_emails(db, record_id).await? {
				fields.push(Field::text("email", email.address));
			}
			for phone in queries::list_contact_phones(db, record_id).await? {
				fields.push(Field::text("phone", phone.number));
			}
			for website in queries::list_contact_websites(db, record_id).await? {
				fields.push(Field::text("website", website.url));
			}
			for relation in queries::list_contact_relations(db, record_id).await? {
				fields.push(Field::text("relation", format!("{} {}", relation.name, relation.relation)));
			}
			for date in queries::list_contact_dates(db, record_id).await? {
				if let Some(occurred_on) = date.occurred_on {
					fields.push(Field::text(date.label, occurred_on.to_string()));
				}
			}
			for custom in queries::list_contact_custom_fields(db, record_id).await? {
				fields.push(Field::text(custom.name, custom.value));
			}

			Ok(Some(SourceDocument {
				owner_id: contact.owner_id,
				kind: SourceKind::Contact,
				record_id,
				fields,
				tags: contact.tags,
				ai_summary: contact.ai_summary,
				ai_tags: contact.ai_tags,
				has_embedding: contact.has_embedding,
			}))
		})
	}
}
