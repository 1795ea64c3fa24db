pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Catalog provider error: {message}")]
	Provider { message: String },
	#[error("Catalog fetch exceeded its {budget_ms} ms budget.")]
	Timeout { budget_ms: u64 },
}
impl From<lupa_providers::Error> for Error {
	fn from(err: lupa_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
