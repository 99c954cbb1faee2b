use serde_json::Value;

use memoir_domain::text::{collapse_whitespace, compose, html_to_text, normalize_fragment};
use memoir_storage::{
	db::Db,
	models::{Comment, FaqEntry, KeywordEntry},
	queries,
};

use crate::{
	Result,
	registry::{Field, SourceDocument},
};

/// Everything attached to a source record that is indexed alongside it.
#[derive(Debug, Default)]
pub struct Related {
	pub comments: Vec<Comment>,
	pub faqs: Vec<FaqEntry>,
	pub keywords: Vec<KeywordEntry>,
}

/// One read per related collection; empty collections are empty vectors,
/// never errors.
pub async fn gather_related(db: &Db, doc: &SourceDocument) -> Result<Related> {
	let comments = queries::list_comments_for_entity(db, doc.record_id).await?;
	let faqs = queries::list_faqs_for_source(db, doc.owner_id, doc.kind, doc.record_id).await?;
	let keywords =
		queries::list_keywords_for_source(db, doc.owner_id, doc.kind, doc.record_id).await?;

	Ok(Related { comments, faqs, keywords })
}

/// Builds the normalized search blob for one record. Pure; the interesting
/// scenarios are unit-testable without a database.
///
/// Each fragment is cleaned on its own (HTML stripped, whitespace collapsed,
/// lowercased, labeled) and then the fragments are joined with newlines so
/// the original field boundaries survive into the index.
pub fn extract_text(doc: &SourceDocument, related: &Related) -> String {
	let mut fragments = Vec::new();

	for field in &doc.fields {
		match field {
			Field::Text { label, value } => {
				fragments.extend(normalize_fragment(label, value));
			},
			Field::Html { label, value } => {
				fragments.extend(normalize_fragment(label, &html_to_text(value)));
			},
			Field::List { label, values } => {
				fragments.extend(normalize_fragment(label, &values.join(", ")));
			},
		}
	}
	for comment in &related.comments {
		fragments.extend(normalize_fragment("comment", &html_to_text(&comment.body)));
	}
	for faq in &related.faqs {
		fragments.extend(normalize_fragment("faq", &format!("{} {}", faq.question, faq.answer)));
	}
	for keyword in &related.keywords {
		fragments.extend(normalize_fragment("keyword", &keyword.keyword));
	}

	compose(&fragments)
}

/// Builds the prompt body the generators send to the chat provider. Unlike
/// the search blob this keeps original casing, and it is bounded so one huge
/// record cannot blow past the provider's context.
pub fn prompt_body(doc: &SourceDocument, max_chars: usize) -> String {
	let mut lines = Vec::new();

	for field in &doc.fields {
		let line = match field {
			Field::Text { label, value } => {
				let cleaned = collapse_whitespace(value);

				if cleaned.is_empty() {
					continue;
				}

				format!("{label}: {cleaned}")
			},
			Field::Html { label, value } => {
				let cleaned = html_to_text(value);

				if cleaned.is_empty() {
					continue;
				}

				format!("{label}: {cleaned}")
			},
			Field::List { label, values } => {
				let cleaned = collapse_whitespace(&values.join(", "));

				if cleaned.is_empty() {
					continue;
				}

				format!("{label}: {cleaned}")
			},
		};

		lines.push(line);
	}

	truncate_chars(lines.join("\n"), max_chars)
}

/// The jsonb filter payload stored next to the index text.
pub fn metadata_filters(doc: &SourceDocument) -> Value {
	serde_json::json!({
		"source_kind": doc.kind.as_str(),
		"tags": doc.tags,
	})
}

fn truncate_chars(text: String, max: usize) -> String {
	if text.chars().count() <= max {
		return text;
	}

	text.chars().take(max).collect()
}
