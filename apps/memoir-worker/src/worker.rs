use std::time::Duration as StdDuration;

use color_eyre::Result;
use time::{Duration, OffsetDateTime};
use tokio::time as tokio_time;

use memoir_domain::SourceKind;
use memoir_pipeline::{Pipeline, PipelineReport};
use memoir_storage::{models::PendingTask, tasks};

const POLL_INTERVAL_MS: u64 = 500;
const CLAIM_LEASE_SECONDS: i64 = 30;
const BASE_BACKOFF_MS: i64 = 500;
const MAX_BACKOFF_MS: i64 = 30_000;
const MAX_TASK_ERROR_CHARS: usize = 1_024;
// An unparseable task kind can never succeed; park it far in the future
// instead of burning retries on it.
const QUARANTINE_DAYS: i64 = 365;

/// What one queue row asks for. Stage and pipeline tasks carry the record's
/// kind in the task tag (`"tags:note"`); the rebuild targets a whole owner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TaskAction {
	Faq(SourceKind),
	Summary(SourceKind),
	Tags(SourceKind),
	Embedding(SourceKind),
	Keywords(SourceKind),
	SearchReindex(SourceKind),
	Pipeline(SourceKind),
	RebuildIndex,
}

pub async fn run_worker(pipeline: Pipeline) -> Result<()> {
	loop {
		if let Err(err) = process_next_task(&pipeline).await {
			tracing::error!(error = %err, "Task processing failed.");
		}

		tokio_time::sleep(StdDuration::from_millis(POLL_INTERVAL_MS)).await;
	}
}

async fn process_next_task(pipeline: &Pipeline) -> Result<()> {
	let now = OffsetDateTime::now_utc();
	let Some(task) = tasks::fetch_next(&pipeline.db, now, CLAIM_LEASE_SECONDS).await? else {
		return Ok(());
	};
	let Some(action) = parse_task_kind(&task.task_kind) else {
		tracing::error!(task_id = %task.task_id, task_kind = %task.task_kind, "Unknown task kind.");
		tasks::mark_failed(
			&pipeline.db,
			task.task_id,
			task.attempts.saturating_add(1),
			Duration::days(QUARANTINE_DAYS),
			"Unknown task kind.",
		)
		.await?;

		return Ok(());
	};

	match run_action(pipeline, action, &task).await {
		Ok(()) => {
			tasks::mark_done(&pipeline.db, task.task_id).await?;
		},
		Err(message) => {
			let attempts = task.attempts.saturating_add(1);
			let backoff = backoff_for_attempt(attempts);
			let error_text = sanitize_task_error(&message);

			tasks::mark_failed(&pipeline.db, task.task_id, attempts, backoff, &error_text).await?;
			tracing::error!(
				task_id = %task.task_id,
				task_kind = %task.task_kind,
				error = %error_text,
				"Task failed.",
			);
		},
	}

	Ok(())
}

/// Runs the claimed task. `Err` carries the text that lands in `last_error`;
/// a stage that merely skipped is a success.
async fn run_action(
	pipeline: &Pipeline,
	action: TaskAction,
	task: &PendingTask,
) -> Result<(), String> {
	let target = task.target_id;
	let result = match action {
		TaskAction::Faq(kind) => pipeline.generate_faq(kind, target).await,
		TaskAction::Summary(kind) => pipeline.generate_summary(kind, target).await,
		TaskAction::Tags(kind) => pipeline.generate_tags(kind, target).await,
		TaskAction::Embedding(kind) => pipeline.embed_record(kind, target).await,
		TaskAction::Keywords(kind) => pipeline.generate_keywords(kind, target).await,
		TaskAction::SearchReindex(kind) => pipeline.reindex(kind, target).await,
		TaskAction::Pipeline(kind) => {
			let report = pipeline.run(kind, target).await;

			if report.ok() {
				return Ok(());
			}

			return Err(format!("Pipeline stages failed: {}.", failed_stages(&report).join(", ")));
		},
		TaskAction::RebuildIndex => {
			let reindexed =
				pipeline.rebuild_search_index(target).await.map_err(|err| err.to_string())?;

			tracing::info!(owner_id = %target, reindexed, "Search index rebuilt.");

			return Ok(());
		},
	};

	result.map(|_| ()).map_err(|err| err.to_string())
}

fn parse_task_kind(raw: &str) -> Option<TaskAction> {
	if raw == "rebuild_index" {
		return Some(TaskAction::RebuildIndex);
	}

	let (op, kind) = raw.split_once(':')?;
	let kind = SourceKind::parse(kind)?;

	match op {
		"faq" => Some(TaskAction::Faq(kind)),
		"summary" => Some(TaskAction::Summary(kind)),
		"tags" => Some(TaskAction::Tags(kind)),
		"embedding" => Some(TaskAction::Embedding(kind)),
		"keywords" => Some(TaskAction::Keywords(kind)),
		"search_reindex" => Some(TaskAction::SearchReindex(kind)),
		"pipeline" => Some(TaskAction::Pipeline(kind)),
		_ => None,
	}
}

fn failed_stages(report: &PipelineReport) -> Vec<&'static str> {
	let mut failed = Vec::new();

	for (name, ok) in [
		("faq", report.faq),
		("summary", report.summary),
		("tags", report.tags),
		("embedding", report.embedding),
		("keywords", report.keywords),
		("search_reindex", report.search_reindex),
	] {
		if !ok {
			failed.push(name);
		}
	}

	failed
}

fn backoff_for_attempt(attempt: i32) -> Duration {
	let attempts = attempt.max(1) as u32;
	let exp = attempts.saturating_sub(1).min(6);
	let base = BASE_BACKOFF_MS.saturating_mul(1 << exp);
	let capped = base.min(MAX_BACKOFF_MS);

	Duration::milliseconds(capped)
}

/// Strips credential-looking material from provider error text before it is
/// persisted on the queue row.
fn sanitize_task_error(text: &str) -> String {
	let mut parts = Vec::new();
	let mut redact_next = false;

	for raw in text.split_whitespace() {
		let mut word = raw.to_string();

		if redact_next {
			word = "[REDACTED]".to_string();
			redact_next = false;
		}
		if raw.eq_ignore_ascii_case("bearer") {
			redact_next = true;
		}

		let lowered = raw.to_ascii_lowercase();

		for key in ["api_key", "apikey", "password", "secret", "token"] {
			if lowered.contains(key) && (lowered.contains('=') || lowered.contains(':')) {
				let sep = if raw.contains('=') { '=' } else { ':' };
				let prefix = match raw.split(sep).next() {
					Some(prefix) => prefix,
					None => raw,
				};

				word = format!("{prefix}{sep}[REDACTED]");

				break;
			}
		}

		parts.push(word);
	}

	let mut out = parts.join(" ");

	if out.chars().count() > MAX_TASK_ERROR_CHARS {
		out = out.chars().take(MAX_TASK_ERROR_CHARS).collect();
		out.push_str("...");
	}

	out
}
