use std::future::Future;

use uuid::Uuid;

use memoir_domain::SourceKind;

use crate::{Pipeline, Result, StageStatus};

/// Per-stage outcome of one full pipeline run. A stage that skipped counts as
/// successful; only hard failures clear its flag.
#[derive(Clone, Copy, Debug)]
pub struct PipelineReport {
	pub faq: bool,
	pub summary: bool,
	pub tags: bool,
	pub embedding: bool,
	pub keywords: bool,
	pub search_reindex: bool,
}
impl PipelineReport {
	pub fn ok(&self) -> bool {
		self.faq
			&& self.summary
			&& self.tags
			&& self.embedding
			&& self.keywords
			&& self.search_reindex
	}
}

impl Pipeline {
	/// Runs every stage for one record in a fixed order. No stage failure
	/// stops the later stages; the reindex runs last so it picks up whatever
	/// artifacts the earlier stages managed to write.
	pub async fn run(&self, kind: SourceKind, record_id: Uuid) -> PipelineReport {
		let faq = stage("faq", self.generate_faq(kind, record_id)).await;
		let summary = stage("summary", self.generate_summary(kind, record_id)).await;
		let tags = stage("tags", self.generate_tags(kind, record_id)).await;
		let embedding = stage("embedding", self.embed_record(kind, record_id)).await;
		let keywords = stage("keywords", self.generate_keywords(kind, record_id)).await;
		let search_reindex = stage("search_reindex", self.reindex(kind, record_id)).await;

		PipelineReport { faq, summary, tags, embedding, keywords, search_reindex }
	}
}

async fn stage(name: &str, fut: impl Future<Output = Result<StageStatus>>) -> bool {
	match fut.await {
		Ok(_) => true,
		Err(err) => {
			tracing::warn!(stage = name, "Pipeline stage failed: {err}");

			false
		},
	}
}
