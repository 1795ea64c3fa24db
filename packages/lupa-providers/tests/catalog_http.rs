use httpmock::prelude::*;

use lupa_domain::catalog::{
	CloudTableIds, ColumnInfo, DatasetRef, DatasetStructure, TableDetails, TableStructure,
};
use lupa_providers::{Error, catalog};
use lupa_testkit as testkit;

#[tokio::test]
async fn search_parses_candidates_and_cleans_ids() {
	let server = MockServer::start_async().await;
	let mut record = testkit::candidate(
		"d30222ad",
		"Relação Anual de Informações Sociais",
		"br_me_rais",
		"Vínculos formais de emprego.",
	);

	record.organization_names = vec!["Ministério da Economia".to_string()];
	record.table_summaries =
		vec![testkit::table("microdados_vinculos", 4), testkit::table("estabelecimentos", 2)];

	let body = testkit::datasets_response(vec![testkit::dataset_node(&record)]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/graphql")
				.header("user-agent", "lupa-tests")
				.body_includes("description_Icontains");
			then.status(200).json_body(body);
		})
		.await;
	let cfg = testkit::sample_config(&server.base_url());
	let candidates = catalog::search_datasets(&cfg.metadata, "rais", 10)
		.await
		.expect("Search must succeed.");

	mock.assert_async().await;

	assert_eq!(candidates, vec![record]);
	assert_eq!(candidates[0].total_columns(), 6);
}

#[tokio::test]
async fn slug_lookup_uses_slug_filter() {
	let server = MockServer::start_async().await;
	let record = testkit::candidate("ibge-1", "IBGE", "ibge", "");
	let body = testkit::datasets_response(vec![testkit::dataset_node(&record)]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql").body_includes("allDataset(slug: $slug");
			then.status(200).json_body(body);
		})
		.await;
	let cfg = testkit::sample_config(&server.base_url());
	let candidates =
		catalog::lookup_slug(&cfg.metadata, "ibge", 1).await.expect("Lookup must succeed.");

	mock.assert_async().await;

	assert_eq!(candidates.len(), 1);
	assert_eq!(candidates[0].slug, "ibge");
}

#[tokio::test]
async fn bad_request_surfaces_graphql_errors() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql");
			then.status(400).json_body(testkit::errors_response(&[
				"Unknown argument \"name__icontains\"",
				"Cannot query field \"foo\"",
			]));
		})
		.await;

	let cfg = testkit::sample_config(&server.base_url());
	let err = catalog::search_datasets(&cfg.metadata, "rais", 10)
		.await
		.expect_err("A 400 response must fail.");

	match err {
		Error::GraphQl { message } => assert_eq!(
			message,
			"Unknown argument \"name__icontains\"; Cannot query field \"foo\""
		),
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn ok_status_with_errors_is_still_an_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql");
			then.status(200).json_body(testkit::errors_response(&["Internal resolver failure"]));
		})
		.await;

	let cfg = testkit::sample_config(&server.base_url());
	let err = catalog::lookup_slug(&cfg.metadata, "rais", 1)
		.await
		.expect_err("GraphQL errors must fail.");

	assert!(matches!(err, Error::GraphQl { .. }));
}

#[tokio::test]
async fn server_error_maps_to_transport_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql");
			then.status(503).body("unavailable");
		})
		.await;

	let cfg = testkit::sample_config(&server.base_url());
	let err = catalog::search_datasets(&cfg.metadata, "rais", 10)
		.await
		.expect_err("A 503 response must fail.");

	assert!(matches!(err, Error::Reqwest(_)));
}

#[tokio::test]
async fn missing_edges_is_invalid_response() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql");
			then.status(200).json_body(serde_json::json!({ "data": {} }));
		})
		.await;

	let cfg = testkit::sample_config(&server.base_url());
	let err = catalog::search_datasets(&cfg.metadata, "rais", 10)
		.await
		.expect_err("A payload without edges must fail.");

	assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn batch_details_sends_clean_ids_and_builds_references() {
	let server = MockServer::start_async().await;
	let structure = DatasetStructure {
		id: "ds-1".to_string(),
		tables: vec![TableStructure {
			name: "Município".to_string(),
			slug: "municipio".to_string(),
			column_count: 3,
			cloud_tables: vec![CloudTableIds {
				gcp_project_id: Some("basedosdados".to_string()),
				gcp_dataset_id: Some("br_ibge_populacao".to_string()),
				gcp_table_id: Some("municipio".to_string()),
			}],
		}],
		organization_names: vec!["IBGE".to_string()],
		theme_names: vec!["População".to_string()],
		tag_names: Vec::new(),
	};
	let body = testkit::datasets_response(vec![testkit::details_node(&structure)]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/graphql")
				.body_includes("id_In")
				.body_includes("\"ids\":[\"ds-1\"]");
			then.status(200).json_body(body);
		})
		.await;
	let cfg = testkit::sample_config(&server.base_url());
	let details = catalog::batch_details(&cfg.metadata, &["DatasetNode:ds-1".to_string()])
		.await
		.expect("Details must succeed.");

	mock.assert_async().await;

	assert_eq!(details.get("ds-1"), Some(&structure));
	assert_eq!(
		details["ds-1"].tables[0].canonical_reference().as_deref(),
		Some("basedosdados.br_ibge_populacao.municipio")
	);
}

#[tokio::test]
async fn batch_details_without_ids_skips_the_request() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql");
			then.status(200).json_body(testkit::datasets_response(Vec::new()));
		})
		.await;
	let cfg = testkit::sample_config(&server.base_url());
	let details = catalog::batch_details(&cfg.metadata, &[" ".to_string()])
		.await
		.expect("Empty id lists must succeed.");

	assert!(details.is_empty());
	assert_eq!(mock.calls_async().await, 0);
}

#[tokio::test]
async fn table_details_lists_columns_with_reference() {
	let server = MockServer::start_async().await;
	let table = TableDetails {
		id: "t-1".to_string(),
		name: "Município".to_string(),
		slug: "municipio".to_string(),
		description: "População residente por município.".to_string(),
		dataset: DatasetRef {
			id: "ds-1".to_string(),
			name: "População".to_string(),
			slug: "br_ibge_populacao".to_string(),
		},
		columns: vec![
			ColumnInfo {
				id: "c-1".to_string(),
				name: "ano".to_string(),
				description: Some("Ano de referência".to_string()),
				data_type: Some("INT64".to_string()),
			},
			ColumnInfo {
				id: "c-2".to_string(),
				name: "populacao".to_string(),
				description: None,
				data_type: Some("INT64".to_string()),
			},
		],
		cloud_tables: vec![CloudTableIds {
			gcp_project_id: Some("basedosdados".to_string()),
			gcp_dataset_id: Some("br_ibge_populacao".to_string()),
			gcp_table_id: Some("municipio".to_string()),
		}],
	};
	let body = testkit::tables_response(vec![testkit::table_node(&table)]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/graphql")
				.body_includes("allTable(id: $id")
				.body_includes("\"id\":\"t-1\"");
			then.status(200).json_body(body);
		})
		.await;
	let cfg = testkit::sample_config(&server.base_url());
	let details = catalog::table_details(&cfg.metadata, "TableNode:t-1")
		.await
		.expect("Table lookup must succeed.");

	mock.assert_async().await;

	assert_eq!(details.as_ref(), Some(&table));
	assert_eq!(
		details.and_then(|table| table.canonical_reference()).as_deref(),
		Some("basedosdados.br_ibge_populacao.municipio")
	);
}

#[tokio::test]
async fn unknown_table_is_none() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql");
			then.status(200).json_body(testkit::tables_response(Vec::new()));
		})
		.await;

	let cfg = testkit::sample_config(&server.base_url());
	let details =
		catalog::table_details(&cfg.metadata, "missing").await.expect("Lookup must succeed.");

	assert_eq!(details, None);
}
