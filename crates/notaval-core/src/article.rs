//! Articles of the governing regulation and legal citations.
//!
//! Certificates are governed by articles 248–255, with article 130 (general
//! form of notarial certificates) cross-referenced by all of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::institution::Institution;

/// An article of the notarial regulation, identified by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(pub u16);

/// Article titles, in document order.
const TITLES: &[(u16, &str)] = &[
    (130, "forma general de los certificados notariales"),
    (248, "acreditación de identidad y personería"),
    (249, "inscripción registral"),
    (250, "acreditación de representación"),
    (251, "vigencia de sociedades"),
    (252, "certificación de firmas"),
    (253, "poderes y mandatos"),
    (254, "declaraciones ante escribano"),
    (255, "situación jurídica de sociedades"),
];

/// Explicit cross-references between articles. Static table, not inferred.
const CROSS_REFS: &[(u16, &[u16])] = &[
    (248, &[130]),
    (249, &[130]),
    (250, &[248]),
    (251, &[249]),
    (252, &[130]),
    (253, &[250]),
    (254, &[130]),
    (255, &[249]),
];

impl Article {
    pub fn title(self) -> Option<&'static str> {
        TITLES.iter().find(|(n, _)| *n == self.0).map(|(_, t)| *t)
    }

    /// Articles this one explicitly cross-references.
    pub fn cross_references(self) -> &'static [u16] {
        CROSS_REFS
            .iter()
            .find(|(n, _)| *n == self.0)
            .map(|(_, refs)| *refs)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Art. {}", self.0)
    }
}

/// Citation attached to a requirement or validation issue: either an article
/// of the regulation or a rule imposed by the receiving institution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalBasis {
    Articulo(Article),
    Institucional(Institution),
}

impl fmt::Display for LegalBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Articulo(a) => write!(f, "{a}"),
            Self::Institucional(i) => write!(f, "Requisito {}", i.as_str()),
        }
    }
}
