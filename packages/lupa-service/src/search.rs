mod diagnostics;
mod enrichment;
mod orchestrator;
mod ranking;
mod scoring;
mod strategy;

pub use diagnostics::{AttemptOutcome, EnrichmentOutcome, SearchDiagnostics, StrategyAttempt};
pub use enrichment::{EnrichedTable, Enrichment, EnrichmentResult, enrich};
pub use orchestrator::{SearchOutcome, search_candidates};
pub use ranking::{cmp_score_desc, rank};
pub use scoring::score;
pub use strategy::SearchStrategy;
