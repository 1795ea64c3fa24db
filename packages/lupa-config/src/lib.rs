mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Enrichment, MetadataProviderConfig, Search, Service};

use std::{
	fs,
	path::{Path, PathBuf},
};

/// Largest candidate set thorough mode may enrich in one batch.
pub const MAX_ENRICHMENT_CANDIDATES: u32 = 10;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: PathBuf::new(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let api_base = cfg.metadata.api_base.trim();

	if api_base.is_empty() {
		return Err(Error::Validation {
			message: "metadata.api_base must be non-empty.".to_string(),
		});
	}
	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "metadata.api_base must start with http:// or https://.".to_string(),
		});
	}
	if !cfg.metadata.path.starts_with('/') {
		return Err(Error::Validation {
			message: "metadata.path must start with '/'.".to_string(),
		});
	}
	if cfg.metadata.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "metadata.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.metadata.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("metadata.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.search.max_limit == 0 {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_limit > cfg.search.max_limit {
		return Err(Error::Validation {
			message: "search.default_limit must not exceed search.max_limit.".to_string(),
		});
	}
	if cfg.enrichment.budget_ms == 0 || cfg.enrichment.budget_ms >= 1_000 {
		return Err(Error::Validation {
			message: "enrichment.budget_ms must be in the range 1-999.".to_string(),
		});
	}
	if cfg.enrichment.max_candidates == 0
		|| cfg.enrichment.max_candidates > MAX_ENRICHMENT_CANDIDATES
	{
		return Err(Error::Validation {
			message: format!(
				"enrichment.max_candidates must be in the range 1-{MAX_ENRICHMENT_CANDIDATES}."
			),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.metadata.api_base.trim().trim_end_matches('/').to_string();

	cfg.metadata.api_base = trimmed;

	if cfg.metadata.path.trim().is_empty() {
		cfg.metadata.path = types::default_graphql_path();
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
