use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Colapsa cualquier secuencia de espacios/saltos de línea a un espacio simple.
pub fn collapse_whitespace(raw: &str) -> String {
    RE_WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Normaliza un término para comparación: NFKD, sin marcas diacríticas,
/// minúsculas, espacios colapsados. "Gestión" y "gestion" comparan iguales.
pub fn normalize_term(raw: &str) -> String {
    let folded: String = raw.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    collapse_whitespace(&folded.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_flattens_runs() {
        assert_eq!(collapse_whitespace("  React\n\t JS  "), "React JS");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("   \n "), "");
    }

    #[test]
    fn normalize_term_strips_accents_and_case() {
        assert_eq!(normalize_term("Gestión"), "gestion");
        assert_eq!(normalize_term("  COMUNICACIÓN  Efectiva "), "comunicacion efectiva");
        assert_eq!(normalize_term("React.js"), "react.js");
    }
}
