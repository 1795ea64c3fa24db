use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use lupa_service::{DiscoverRequest, LupaService};

#[derive(Debug, Parser)]
#[command(
	version = lupa_cli::VERSION,
	rename_all = "kebab",
	styles = lupa_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Search the catalog and print ranked datasets as JSON.
	Discover {
		query: String,
		#[arg(long, value_name = "N")]
		limit: Option<u32>,
		/// Fetch table structure for the top results within the enrichment budget.
		#[arg(long)]
		thorough: bool,
		#[arg(long, value_name = "THEME")]
		theme: Option<String>,
		#[arg(long, value_name = "ORGANIZATION")]
		organization: Option<String>,
	},
	/// Print tables, column counts and warehouse references for one dataset.
	Details { dataset_id: String },
	/// Print every column of one table with its type and description.
	Table { table_id: String },
}
impl Command {
	fn name(&self) -> &'static str {
		match self {
			Self::Discover { .. } => "discover",
			Self::Details { .. } => "details",
			Self::Table { .. } => "table",
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = lupa_config::load(&args.config)?;

	init_tracing(&config);

	tracing::info!(
		config = %args.config.display(),
		command = args.command.name(),
		catalog = %config.metadata.api_base,
		"Configuration loaded."
	);

	let service = LupaService::new(config);
	let output = match args.command {
		Command::Discover { query, limit, thorough, theme, organization } => {
			let req = DiscoverRequest { query, limit, thorough, theme, organization };
			let response = service.discover(req).await;

			serde_json::to_string_pretty(&response)?
		},
		Command::Details { dataset_id } => {
			let Some(details) = service.dataset_details(&dataset_id).await? else {
				return Err(eyre::eyre!("Dataset {dataset_id} was not found."));
			};

			serde_json::to_string_pretty(&details)?
		},
		Command::Table { table_id } => {
			let Some(table) = service.table_details(&table_id).await? else {
				return Err(eyre::eyre!("Table {table_id} was not found."));
			};

			serde_json::to_string_pretty(&table)?
		},
	};

	println!("{output}");

	Ok(())
}

fn init_tracing(config: &lupa_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	// Stdout carries the JSON result.
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
