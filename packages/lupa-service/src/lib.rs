pub mod details;
pub mod discover;
pub mod search;

mod error;

pub use details::TableOverview;
pub use discover::{DiscoverItem, DiscoverRequest, DiscoverResponse};
pub use error::{Error, Result};
pub use search::{
	AttemptOutcome, EnrichedTable, Enrichment, EnrichmentOutcome, EnrichmentResult,
	SearchDiagnostics, SearchOutcome, SearchStrategy, StrategyAttempt,
};

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use lupa_config::{Config, MetadataProviderConfig};
use lupa_domain::catalog::{CandidateRecord, DatasetStructure, TableDetails};
use lupa_providers::catalog;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Free-text and exact-slug lookups against the catalog.
pub trait CatalogSearch
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		text: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateRecord>>>;

	fn lookup_exact<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		slug: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateRecord>>>;
}

/// Structural fetches: batched per dataset, or one table with its columns.
pub trait CatalogDetails
where
	Self: Send + Sync,
{
	fn batch_details<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		ids: &'a [String],
	) -> BoxFuture<'a, Result<HashMap<String, DatasetStructure>>>;

	fn table_details<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		table_id: &'a str,
	) -> BoxFuture<'a, Result<Option<TableDetails>>>;
}

#[derive(Clone)]
pub struct Sources {
	pub search: Arc<dyn CatalogSearch>,
	pub details: Arc<dyn CatalogDetails>,
}
impl Sources {
	pub fn new(search: Arc<dyn CatalogSearch>, details: Arc<dyn CatalogDetails>) -> Self {
		Self { search, details }
	}
}
impl Default for Sources {
	fn default() -> Self {
		let remote = Arc::new(RemoteCatalog);

		Self { search: remote.clone(), details: remote }
	}
}

pub struct LupaService {
	pub cfg: Config,
	pub sources: Sources,
}
impl LupaService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, sources: Sources::default() }
	}

	pub fn with_sources(cfg: Config, sources: Sources) -> Self {
		Self { cfg, sources }
	}
}

struct RemoteCatalog;
impl CatalogSearch for RemoteCatalog {
	fn search<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		text: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateRecord>>> {
		Box::pin(async move { Ok(catalog::search_datasets(cfg, text, max_results).await?) })
	}

	fn lookup_exact<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		slug: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateRecord>>> {
		Box::pin(async move { Ok(catalog::lookup_slug(cfg, slug, max_results).await?) })
	}
}
impl CatalogDetails for RemoteCatalog {
	fn batch_details<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		ids: &'a [String],
	) -> BoxFuture<'a, Result<HashMap<String, DatasetStructure>>> {
		Box::pin(async move { Ok(catalog::batch_details(cfg, ids).await?) })
	}

	fn table_details<'a>(
		&'a self,
		cfg: &'a MetadataProviderConfig,
		table_id: &'a str,
	) -> BoxFuture<'a, Result<Option<TableDetails>>> {
		Box::pin(async move { Ok(catalog::table_details(cfg, table_id).await?) })
	}
}
