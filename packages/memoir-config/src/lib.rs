mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Ai, Config, Indexing, Postgres, Qdrant, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.qdrant.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.url must be non-empty.".to_string(),
		});
	}
	if !cfg.ai.temperature.is_finite() || !(0.0..=2.0).contains(&cfg.ai.temperature) {
		return Err(Error::Validation {
			message: "ai.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if cfg.ai.max_tokens == 0 {
		return Err(Error::Validation {
			message: "ai.max_tokens must be greater than zero.".to_string(),
		});
	}
	if cfg.ai.max_prompt_chars == 0 {
		return Err(Error::Validation {
			message: "ai.max_prompt_chars must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("ai.max_tags", cfg.ai.max_tags),
		("ai.max_faq_entries", cfg.ai.max_faq_entries),
		("ai.max_keywords", cfg.ai.max_keywords),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	for (label, value) in [
		("ai.chat_timeout_ms", cfg.ai.chat_timeout_ms),
		("ai.embedding_timeout_ms", cfg.ai.embedding_timeout_ms),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if cfg.indexing.rebuild_batch_size == 0 {
		return Err(Error::Validation {
			message: "indexing.rebuild_batch_size must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
