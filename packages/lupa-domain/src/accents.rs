//! Restoration of Portuguese diacritics that users commonly omit when typing queries.

/// Unaccented to accented forms. Replacement runs in declaration order and later entries see the
/// output of earlier ones, so reordering entries changes results.
pub const ACCENT_TABLE: &[(&str, &str)] = &[
	// Productive suffixes.
	("cao", "ção"),
	("sao", "são"),
	("nao", "não"),
	// High-frequency catalog vocabulary.
	("populacao", "população"),
	("educacao", "educação"),
	("saude", "saúde"),
	("inflacao", "inflação"),
	("violencia", "violência"),
	("ciencia", "ciência"),
	("experiencia", "experiência"),
	("situacao", "situação"),
	("informacao", "informação"),
	("comunicacao", "comunicação"),
	("administracao", "administração"),
	("organizacao", "organização"),
	("producao", "produção"),
	("construcao", "construção"),
	("operacao", "operação"),
	("participacao", "participação"),
	("avaliacao", "avaliação"),
	("aplicacao", "aplicação"),
	("investigacao", "investigação"),
	("observacao", "observação"),
	("conservacao", "conservação"),
	("preservacao", "preservação"),
	("transformacao", "transformação"),
	("democratica", "democrática"),
	("economica", "econômica"),
	("publica", "pública"),
	("politica", "política"),
	("historica", "histórica"),
	("geografica", "geográfica"),
	("demografica", "demográfica"),
	("academica", "acadêmica"),
	("medica", "médica"),
	("tecnica", "técnica"),
	("biologica", "biológica"),
	("matematica", "matemática"),
	("familia", "família"),
	("historia", "história"),
	("memoria", "memória"),
	("secretaria", "secretária"),
	("area", "área"),
	("energia", "energia"),
	("materia", "matéria"),
	("territorio", "território"),
	("relatorio", "relatório"),
	("laboratorio", "laboratório"),
	("diretorio", "diretório"),
	("repositorio", "repositório"),
	("brasilia", "brasília"),
	("agua", "água"),
	("orgao", "órgão"),
	("orgaos", "órgãos"),
	("opcao", "opção"),
	("opcoes", "opções"),
	("acao", "ação"),
	("acoes", "ações"),
	("regiao", "região"),
	("regioes", "regiões"),
	("estado", "estado"),
	("municipio", "município"),
	("municipios", "municípios"),
];

/// Lower-cases `text` and restores common diacritics.
///
/// A whole-string match against the table wins outright, which keeps short inputs such as
/// acronyms stable. Otherwise every table entry found in the lower-cased text is replaced, in
/// table order. Empty input is returned unchanged.
pub fn normalize_accents(text: &str) -> String {
	if text.is_empty() {
		return String::new();
	}

	let mut normalized = text.to_lowercase();

	if let Some((_, accented)) =
		ACCENT_TABLE.iter().find(|(unaccented, _)| *unaccented == normalized)
	{
		return (*accented).to_string();
	}

	for (unaccented, accented) in ACCENT_TABLE {
		if normalized.contains(unaccented) {
			normalized = normalized.replace(unaccented, accented);
		}
	}

	normalized
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn restores_suffix_patterns() {
		assert_eq!(normalize_accents("populacao"), "população");
		assert_eq!(normalize_accents("informacoes"), "informações");
		assert_eq!(normalize_accents("Educacao Basica"), "educação basica");
	}

	#[test]
	fn whole_string_match_short_circuits() {
		assert_eq!(normalize_accents("cao"), "ção");
		assert_eq!(normalize_accents("ESTADO"), "estado");
	}

	#[test]
	fn empty_input_is_unchanged() {
		assert_eq!(normalize_accents(""), "");
	}

	#[test]
	fn table_keys_are_unaccented_ascii() {
		for (unaccented, _) in ACCENT_TABLE {
			assert!(unaccented.is_ascii(), "{unaccented} must be ASCII");
			assert_eq!(unaccented.to_lowercase(), *unaccented);
		}
	}
}
