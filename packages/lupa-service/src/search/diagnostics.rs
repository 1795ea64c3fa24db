use serde::Serialize;

use super::strategy::SearchStrategy;
use lupa_domain::query::NormalizedQuery;

/// What one discovery call did, reported alongside its results. Never affects ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchDiagnostics {
	pub raw_query: String,
	pub normalized_query: String,
	pub fallback_keywords: Vec<String>,
	pub attempts: Vec<StrategyAttempt>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub enrichment: Option<EnrichmentOutcome>,
	pub notes: Vec<String>,
}
impl SearchDiagnostics {
	pub fn new(raw_query: &str, query: &NormalizedQuery) -> Self {
		Self {
			raw_query: raw_query.to_string(),
			normalized_query: query.text.clone(),
			fallback_keywords: query.fallback_keywords.clone(),
			..Default::default()
		}
	}

	pub fn attempts_for(
		&self,
		strategy: SearchStrategy,
	) -> impl Iterator<Item = &StrategyAttempt> + '_ {
		self.attempts.iter().filter(move |attempt| attempt.strategy == strategy)
	}

	pub fn note(&mut self, message: impl Into<String>) {
		self.notes.push(message.into());
	}

	pub(crate) fn record_ran(
		&mut self,
		strategy: SearchStrategy,
		input: &str,
		cap: u32,
		returned: usize,
		added: usize,
	) {
		self.attempts.push(StrategyAttempt {
			strategy,
			input: Some(input.to_string()),
			cap: Some(cap),
			outcome: AttemptOutcome::Ran { returned, added },
		});
	}

	pub(crate) fn record_failed(
		&mut self,
		strategy: SearchStrategy,
		input: &str,
		cap: u32,
		error: String,
	) {
		self.attempts.push(StrategyAttempt {
			strategy,
			input: Some(input.to_string()),
			cap: Some(cap),
			outcome: AttemptOutcome::Failed { error },
		});
	}

	pub(crate) fn record_skipped(&mut self, strategy: SearchStrategy, reason: &str) {
		self.attempts.push(StrategyAttempt {
			strategy,
			input: None,
			cap: None,
			outcome: AttemptOutcome::Skipped { reason: reason.to_string() },
		});
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyAttempt {
	pub strategy: SearchStrategy,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub input: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cap: Option<u32>,
	#[serde(flatten)]
	pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
	Ran { returned: usize, added: usize },
	Failed { error: String },
	Skipped { reason: String },
}
impl AttemptOutcome {
	pub fn is_skipped(&self) -> bool {
		matches!(self, Self::Skipped { .. })
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnrichmentOutcome {
	Completed { requested: usize, returned: usize, elapsed_ms: u64 },
	TimedOut { budget_ms: u64, elapsed_ms: u64 },
	Failed { error: String, elapsed_ms: u64 },
}
