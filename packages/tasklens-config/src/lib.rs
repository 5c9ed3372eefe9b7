mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Ranking, Search, Service, Summary, UpstreamConfig};

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
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.upstream.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "upstream.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.upstream.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "upstream.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (setting, path) in [
		("upstream.categories_path", &cfg.upstream.categories_path),
		("upstream.tasks_path", &cfg.upstream.tasks_path),
		("upstream.updates_path", &cfg.upstream.updates_path),
	] {
		if !path.starts_with('/') {
			return Err(Error::UpstreamPath { setting, path: path.clone() });
		}
	}

	if cfg.search.max_query_terms == 0 {
		return Err(Error::Validation {
			message: "search.max_query_terms must be greater than zero.".to_string(),
		});
	}
	if !cfg.ranking.recency_tau_days.is_finite() {
		return Err(Error::Validation {
			message: "ranking.recency_tau_days must be a finite number.".to_string(),
		});
	}
	if cfg.ranking.recency_tau_days < 0.0 {
		return Err(Error::Validation {
			message: "ranking.recency_tau_days must be zero or greater.".to_string(),
		});
	}
	if !cfg.ranking.recency_weight.is_finite() {
		return Err(Error::Validation {
			message: "ranking.recency_weight must be a finite number.".to_string(),
		});
	}
	if cfg.ranking.recency_weight < 0.0 {
		return Err(Error::Validation {
			message: "ranking.recency_weight must be zero or greater.".to_string(),
		});
	}
	if cfg.summary.max_snippets == 0 {
		return Err(Error::Validation {
			message: "summary.max_snippets must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
