pub mod completion;
pub mod embedding;
pub mod json;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap},
};

/// One resolved provider endpoint. Per-owner: the values come from the
/// owner's stored settings, not global config.
#[derive(Clone, Debug)]
pub struct Endpoint {
	pub provider: String,
	pub api_base: String,
	pub api_key: String,
	pub model: String,
	pub timeout_ms: u64,
}
impl Endpoint {
	pub fn is_local(&self) -> bool {
		self.provider == "ollama"
	}

	fn url(&self, path: &str) -> String {
		format!("{}{path}", self.api_base.trim_end_matches('/'))
	}
}

fn http_client(timeout_ms: u64) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?)
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if !api_key.is_empty() {
		headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	}

	Ok(headers)
}
