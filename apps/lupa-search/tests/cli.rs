use clap::Parser;

use lupa_search::{Args, Command};

#[test]
fn parses_discover_with_options() {
	let args = Args::try_parse_from([
		"lupa-search",
		"-c",
		"lupa.toml",
		"discover",
		"populacao do brasil",
		"--limit",
		"5",
		"--thorough",
		"--theme",
		"População",
	])
	.expect("discover arguments must parse");

	assert_eq!(args.config.to_str(), Some("lupa.toml"));

	match args.command {
		Command::Discover { query, limit, thorough, theme, organization } => {
			assert_eq!(query, "populacao do brasil");
			assert_eq!(limit, Some(5));
			assert!(thorough);
			assert_eq!(theme.as_deref(), Some("População"));
			assert_eq!(organization, None);
		},
		other => panic!("Unexpected command: {other:?}"),
	}
}

#[test]
fn parses_details() {
	let args = Args::try_parse_from(["lupa-search", "--config", "lupa.toml", "details", "ds-1"])
		.expect("details arguments must parse");

	assert!(matches!(args.command, Command::Details { dataset_id } if dataset_id == "ds-1"));
}

#[test]
fn parses_table() {
	let args = Args::try_parse_from(["lupa-search", "-c", "lupa.toml", "table", "TableNode:t-1"])
		.expect("table arguments must parse");

	assert!(matches!(args.command, Command::Table { table_id } if table_id == "TableNode:t-1"));
}

#[test]
fn config_is_required() {
	assert!(Args::try_parse_from(["lupa-search", "discover", "rais"]).is_err());
}
