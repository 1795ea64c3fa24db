use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = lupa_search::Args::parse();

	lupa_search::run(args).await
}
