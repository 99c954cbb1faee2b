pub mod extract;
pub mod registry;

mod adapters;
mod embed;
mod error;
mod faq;
mod keywords;
mod pipeline;
mod rebuild;
mod reindex;
mod settings;
mod summary;
mod tags;

pub use error::{Error, Result};
pub use pipeline::PipelineReport;

use std::{future::Future, pin::Pin, sync::Arc};

use memoir_config::Config;
use memoir_providers::{
	Endpoint,
	completion::{self, ChatRequest},
	embedding,
};
use memoir_storage::{db::Db, qdrant::VectorStore};

use crate::registry::SourceRegistry;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of one pipeline stage.
///
/// Skipped covers the benign exits: the record vanished before the stage ran,
/// or the owner has no usable provider configuration. Hard failures travel as
/// [`Error`] instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageStatus {
	Done,
	Skipped,
}

pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		endpoint: &'a Endpoint,
		req: &'a ChatRequest,
	) -> BoxFuture<'a, memoir_providers::Result<String>>;
}

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		endpoint: &'a Endpoint,
		text: &'a str,
	) -> BoxFuture<'a, memoir_providers::Result<Vec<f32>>>;

	fn ensure_model<'a>(
		&'a self,
		endpoint: &'a Endpoint,
	) -> BoxFuture<'a, memoir_providers::Result<()>>;
}

struct DefaultProviders;

impl ChatProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		endpoint: &'a Endpoint,
		req: &'a ChatRequest,
	) -> BoxFuture<'a, memoir_providers::Result<String>> {
		Box::pin(completion::complete(endpoint, req))
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		endpoint: &'a Endpoint,
		text: &'a str,
	) -> BoxFuture<'a, memoir_providers::Result<Vec<f32>>> {
		Box::pin(embedding::embed(endpoint, text))
	}

	fn ensure_model<'a>(
		&'a self,
		endpoint: &'a Endpoint,
	) -> BoxFuture<'a, memoir_providers::Result<()>> {
		Box::pin(embedding::ensure_model(endpoint))
	}
}

#[derive(Clone)]
pub struct Providers {
	pub chat: Arc<dyn ChatProvider>,
	pub embedding: Arc<dyn EmbeddingProvider>,
}
impl Providers {
	pub fn new(chat: Arc<dyn ChatProvider>, embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { chat, embedding }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { chat: provider.clone(), embedding: provider }
	}
}

pub struct Pipeline {
	pub cfg: Config,
	pub db: Db,
	pub vectors: VectorStore,
	pub providers: Providers,
	registry: SourceRegistry,
}
impl Pipeline {
	pub fn new(cfg: Config, db: Db, vectors: VectorStore) -> Self {
		Self { cfg, db, vectors, providers: Providers::default(), registry: SourceRegistry::with_defaults() }
	}

	pub fn with_providers(cfg: Config, db: Db, vectors: VectorStore, providers: Providers) -> Self {
		Self { cfg, db, vectors, providers, registry: SourceRegistry::with_defaults() }
	}

	pub fn registry(&self) -> &SourceRegistry {
		&self.registry
	}
}
