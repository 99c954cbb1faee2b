use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub ai: Ai,
	#[serde(default)]
	pub indexing: Indexing,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
}

/// Bounds applied to every outbound AI call. Per-owner provider selection and
/// credentials live in the document store, not here.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ai {
	pub temperature: f32,
	pub max_tokens: u32,
	pub max_prompt_chars: usize,
	pub max_tags: usize,
	pub max_faq_entries: usize,
	pub max_keywords: usize,
	pub chat_timeout_ms: u64,
	pub embedding_timeout_ms: u64,
}
impl Default for Ai {
	fn default() -> Self {
		Self {
			temperature: 0.2,
			max_tokens: 1_024,
			max_prompt_chars: 8_192,
			max_tags: 10,
			max_faq_entries: 10,
			max_keywords: 25,
			chat_timeout_ms: 60_000,
			embedding_timeout_ms: 30_000,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Indexing {
	pub rebuild_batch_size: usize,
}
impl Default for Indexing {
	fn default() -> Self {
		Self { rebuild_batch_size: 10 }
	}
}
