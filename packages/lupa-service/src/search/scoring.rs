use regex::Regex;

use lupa_domain::{catalog::CandidateRecord, text};

/// Domain acronyms and the full names they stand for.
const ACRONYMS: &[(&str, &str)] = &[
	("rais", "relação anual de informações sociais"),
	("ibge", "instituto brasileiro de geografia e estatística"),
	("ipea", "instituto de pesquisa econômica aplicada"),
	("inep", "instituto nacional de estudos e pesquisas educacionais"),
	("tse", "tribunal superior eleitoral"),
	("sus", "sistema único de saúde"),
	("pnad", "pesquisa nacional por amostra de domicílios"),
	("pof", "pesquisa de orçamentos familiares"),
	("censo", "censo demográfico"),
	("caged", "cadastro geral de empregados e desempregados"),
	("sinasc", "sistema de informações sobre nascidos vivos"),
	("sim", "sistema de informações sobre mortalidade"),
];
const OFFICIAL_SOURCE_MARKERS: &[&str] =
	&["ibge", "ipea", "inep", "ministério", "secretaria", "agência nacional"];

const NAME_EQUALS: f64 = 100.0;
const NAME_WORD_EQUALS: f64 = 80.0;
const SLUG_EQUALS: f64 = 200.0;
const SLUG_PHRASE_EQUALS: f64 = 250.0;
const ACRONYM_NAME: f64 = 150.0;
const ACRONYM_DESCRIPTION: f64 = 100.0;
const ACRONYM_IN_RAW_NAME: f64 = 180.0;
const NAME_CONTAINS: f64 = 50.0;
const DESCRIPTION_CONTAINS: f64 = 20.0;
const NAME_WORD_BOUNDARY: f64 = 30.0;
const DESCRIPTION_WORD_BOUNDARY: f64 = 15.0;
const OFFICIAL_SOURCE: f64 = 10.0;
const LONG_NAME_PENALTY: f64 = 5.0;
const LONG_NAME_CHARS: usize = 100;
const SPECIFICITY_MIN_CHARS: usize = 4;
const SPECIFICITY_MAX: f64 = 20.0;

/// Relevance of `candidate` for the caller's query. Pure; empty queries score `0.0`.
///
/// The name and slug equality tiers are mutually exclusive, but the slug phrase bonus stacks on
/// top of them, so a query equal to the slug collects both slug bonuses.
pub fn score(query: &str, candidate: &CandidateRecord) -> f64 {
	let query = query.trim().to_lowercase();

	if query.is_empty() {
		return 0.0;
	}

	let name = candidate.name.to_lowercase();
	let description = candidate.description.to_lowercase();
	let slug = candidate.slug.to_lowercase();
	let name_words: Vec<&str> = name.split_whitespace().collect();
	let mut total = 0.0;

	if query == name {
		total += NAME_EQUALS;
	} else if name_words.contains(&query.as_str()) {
		total += NAME_WORD_EQUALS;
	} else if query == slug {
		total += SLUG_EQUALS;
	}
	if query == slug || query == slug.replace('_', " ") {
		total += SLUG_PHRASE_EQUALS;
	}

	if let Some(expansion) = acronym_expansion(&query) {
		if expansion.split_whitespace().any(|word| name.contains(word)) {
			total += ACRONYM_NAME;
		} else if expansion.split_whitespace().any(|word| description.contains(word)) {
			total += ACRONYM_DESCRIPTION;
		}
		if contains_word(&candidate.name, &query.to_uppercase()) {
			total += ACRONYM_IN_RAW_NAME;
		}
	}

	if name.contains(&query) {
		total += NAME_CONTAINS;

		if let Some(idx) = name_words.iter().position(|word| word.contains(&query)) {
			total += (20.0 - 2.0 * idx as f64).max(5.0);
		}
	}
	if description.contains(&query) {
		total += DESCRIPTION_CONTAINS;
	}

	if contains_word(&name, &query) {
		total += NAME_WORD_BOUNDARY;
	}
	if contains_word(&description, &query) {
		total += DESCRIPTION_WORD_BOUNDARY;
	}

	let query_chars = text::char_len(&query);

	if query_chars >= SPECIFICITY_MIN_CHARS {
		total += (2.0 * query_chars as f64).min(SPECIFICITY_MAX);
	}

	let organizations = candidate.organizations_text().to_lowercase();

	if OFFICIAL_SOURCE_MARKERS.iter().any(|marker| organizations.contains(marker)) {
		total += OFFICIAL_SOURCE;
	}
	if text::char_len(&name) > LONG_NAME_CHARS {
		total -= LONG_NAME_PENALTY;
	}

	total
}

fn acronym_expansion(query: &str) -> Option<&'static str> {
	ACRONYMS.iter().find(|(acronym, _)| *acronym == query).map(|(_, expansion)| *expansion)
}

fn contains_word(haystack: &str, word: &str) -> bool {
	Regex::new(&format!(r"\b{}\b", regex::escape(word)))
		.map(|pattern| pattern.is_match(haystack))
		.unwrap_or(false)
}
