//! Receiving-institution taxonomy and purpose normalisation.
//!
//! Clients phrase the certificate destination freely ("para Abitab",
//! "ABITAB S.A.", "bps y dgi"). All of that ambiguity is resolved in one
//! place: [`match_institutions`] folds the purpose text to a canonical form
//! and scans a fixed alias table. Compound purposes match every applicable
//! institution; an unmatched purpose matches none, which is not an error —
//! institution rules are additive on top of the base legal template.

use serde::{Deserialize, Serialize};

/// A receiving institution with codified special rules, or `Otra` for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Institution {
    /// Banco de Previsión Social.
    Bps,
    /// Dirección General Impositiva.
    Dgi,
    /// Banco de Seguros del Estado.
    Bse,
    /// Banco Central del Uruguay.
    Bcu,
    Abitab,
    /// Registro Único de Proveedores del Estado.
    Rupe,
    ZonaFranca,
    /// Ministerio de Transporte y Obras Públicas.
    Mtop,
    /// A bank without institution-specific codified rules.
    Banco,
    /// Known destination without codified rules.
    Otra(String),
}

impl Institution {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bps => "BPS",
            Self::Dgi => "DGI",
            Self::Bse => "BSE",
            Self::Bcu => "BCU",
            Self::Abitab => "Abitab",
            Self::Rupe => "RUPE",
            Self::ZonaFranca => "Zona Franca",
            Self::Mtop => "MTOP",
            Self::Banco => "Banco",
            Self::Otra(name) => name,
        }
    }
}

/// Alias table: institutions in fixed match order, each with lowercase,
/// accent-folded substrings. Order is load-bearing — it fixes the order of
/// matched institutions and therefore of merged requirements downstream.
const ALIASES: &[(Institution, &[&str])] = &[
    (Institution::Bps, &["bps", "banco de prevision", "prevision social"]),
    (Institution::Dgi, &["dgi", "impositiva"]),
    (Institution::Bse, &["bse", "banco de seguros"]),
    (Institution::Bcu, &["bcu", "banco central"]),
    (Institution::Abitab, &["abitab"]),
    (Institution::Rupe, &["rupe", "proveedores del estado"]),
    (Institution::ZonaFranca, &["zona franca", "zonamerica", "free zone"]),
    (Institution::Mtop, &["mtop", "ministerio de transporte"]),
];

/// Normalise a free-text purpose to the set of canonical institutions it names.
///
/// Matching is substring-based over the folded text. A compound purpose like
/// "BPS y DGI" yields both institutions, in alias-table order. The generic
/// "banco" alias only applies when no specific bank (BPS, BSE, BCU) matched,
/// so "banco de seguros" resolves to BSE alone.
pub fn match_institutions(purpose: &str) -> Vec<Institution> {
    let folded = fold(purpose);
    let mut matched: Vec<Institution> = ALIASES
        .iter()
        .filter(|(_, aliases)| aliases.iter().any(|a| folded.contains(a)))
        .map(|(inst, _)| inst.clone())
        .collect();

    let has_specific_bank = matched
        .iter()
        .any(|i| matches!(i, Institution::Bps | Institution::Bse | Institution::Bcu));
    if folded.contains("banco") && !has_specific_bank {
        matched.push(Institution::Banco);
    }

    matched
}

/// Lowercase, strip accents, collapse runs of whitespace/punctuation to a
/// single space. Shared with cross-document field comparison.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for c in text.chars() {
        let c = match c.to_lowercase().next().unwrap_or(c) {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        };
        if c.is_alphanumeric() {
            out.push(c);
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: assert a purpose matches exactly the given institutions, in order.
    fn assert_matches(purpose: &str, expected: &[Institution]) {
        assert_eq!(
            match_institutions(purpose),
            expected.to_vec(),
            "purpose {purpose:?}"
        );
    }

    #[test]
    fn abitab_spellings() {
        assert_matches("para Abitab", &[Institution::Abitab]);
        assert_matches("abitab", &[Institution::Abitab]);
        assert_matches("ABITAB S.A.", &[Institution::Abitab]);
    }

    #[test]
    fn bps_spellings() {
        assert_matches("BPS", &[Institution::Bps]);
        assert_matches("Banco de Previsión Social", &[Institution::Bps]);
        assert_matches("previsión social", &[Institution::Bps]);
    }

    #[test]
    fn zona_franca_spellings() {
        assert_matches("zona franca", &[Institution::ZonaFranca]);
        assert_matches("Zonamerica", &[Institution::ZonaFranca]);
        assert_matches("trámite en Zona  Franca", &[Institution::ZonaFranca]);
    }

    #[test]
    fn compound_purpose_matches_all() {
        assert_matches("BPS y DGI", &[Institution::Bps, Institution::Dgi]);
        assert_matches(
            "para presentar ante DGI, BPS y RUPE",
            &[Institution::Bps, Institution::Dgi, Institution::Rupe],
        );
    }

    #[test]
    fn specific_bank_suppresses_generic_banco() {
        assert_matches("Banco de Seguros del Estado", &[Institution::Bse]);
        assert_matches("Banco Central", &[Institution::Bcu]);
        assert_matches("Banco República", &[Institution::Banco]);
    }

    #[test]
    fn unmatched_purpose_matches_nothing() {
        assert_matches("uso personal", &[]);
        assert_matches("Intendencia de Montevideo", &[]);
    }

    #[test]
    fn accents_and_case_folded() {
        assert_eq!(fold("Dirección General Impositiva"), "direccion general impositiva");
        assert_eq!(fold("GIRTEC  S.A."), "girtec s a");
    }

    #[test]
    fn fold_collapses_punctuation_runs() {
        assert_eq!(fold("a -- b"), "a b");
        assert_eq!(fold("  trailing!  "), "trailing");
    }
}
