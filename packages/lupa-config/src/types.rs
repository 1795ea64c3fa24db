use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub metadata: MetadataProviderConfig,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub enrichment: Enrichment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Connection settings for the remote catalog metadata service (GraphQL over HTTP).
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataProviderConfig {
	pub api_base: String,
	#[serde(default = "default_graphql_path")]
	pub path: String,
	/// Per-request HTTP timeout. The enrichment budget is enforced separately.
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}
impl MetadataProviderConfig {
	pub fn endpoint(&self) -> String {
		format!("{}{}", self.api_base, self.path)
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Result limit used when a caller does not pass one.
	pub default_limit: u32,
	/// Hard clamp applied to every caller-supplied limit.
	pub max_limit: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_limit: 10, max_limit: 50 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Enrichment {
	/// Wall-clock budget for the batched structural fetch in thorough mode.
	pub budget_ms: u64,
	/// Number of top-ranked candidates thorough mode enriches.
	pub max_candidates: u32,
}
impl Default for Enrichment {
	fn default() -> Self {
		Self { budget_ms: 800, max_candidates: 10 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

pub(crate) fn default_graphql_path() -> String {
	"/graphql".to_string()
}
