//! Resolved legal requirements: the contract the evidence must satisfy.

use serde::{Deserialize, Serialize};

use crate::article::{Article, LegalBasis};
use crate::evidence::DocumentType;
use crate::institution::Institution;
use crate::intent::CertificateType;

/// One document the law or an institution demands for a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDocument {
    pub document_type: DocumentType,
    pub description: String,
    pub mandatory: bool,
    /// Maximum accepted age in days. `None` means the document never expires.
    /// Always ≥ 1 when present (enforced by the constructors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_days: Option<u32>,
    pub legal_basis: LegalBasis,
    /// When set, only evidence issued by this institution satisfies the
    /// requirement — a BPS certificate never covers a DGI one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_specific: Option<Institution>,
}

impl RequiredDocument {
    pub fn new(
        document_type: DocumentType,
        description: &str,
        mandatory: bool,
        legal_basis: LegalBasis,
    ) -> Self {
        Self {
            document_type,
            description: description.to_string(),
            mandatory,
            expiry_days: None,
            legal_basis,
            institution_specific: None,
        }
    }

    /// Mark the document as expiring after `days` (must be ≥ 1).
    pub fn expiring(mut self, days: u32) -> Self {
        assert!(days >= 1, "expiry_days must be positive");
        self.expiry_days = Some(days);
        self
    }

    pub fn institution_specific(mut self, institution: Institution) -> Self {
        self.institution_specific = Some(institution);
        self
    }

    pub fn expires(&self) -> bool {
        self.expiry_days.is_some()
    }
}

/// Data elements that must be extractable from the evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredElement {
    RazonSocial,
    Rut,
    InscripcionRegistro,
    RepresentanteLegal,
    CedulaIdentidad,
    Domicilio,
}

impl RequiredElement {
    /// Canonical key in `ExtractedDocument::extracted_fields`.
    pub fn key(self) -> &'static str {
        match self {
            Self::RazonSocial => "razon_social",
            Self::Rut => "rut",
            Self::InscripcionRegistro => "inscripcion_registro",
            Self::RepresentanteLegal => "representante_legal",
            Self::CedulaIdentidad => "cedula",
            Self::Domicilio => "domicilio",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::RazonSocial => "razón social",
            Self::Rut => "RUT",
            Self::InscripcionRegistro => "inscripción en Registro de Comercio",
            Self::RepresentanteLegal => "representante legal",
            Self::CedulaIdentidad => "cédula de identidad",
            Self::Domicilio => "domicilio",
        }
    }

    /// Article that requires the element.
    pub fn legal_basis(self) -> Article {
        match self {
            Self::RazonSocial | Self::Rut | Self::RepresentanteLegal => Article(248),
            Self::InscripcionRegistro => Article(249),
            Self::CedulaIdentidad => Article(248),
            Self::Domicilio => Article(130),
        }
    }

    /// Check a raw extracted value against the element's canonical format.
    ///
    /// RUT: exactly 12 digits after stripping separators. Cédula: 7 or 8
    /// digits. Other elements only need a non-empty value.
    pub fn format_is_valid(self, value: &str) -> bool {
        match self {
            Self::Rut => digit_count(value) == 12,
            Self::CedulaIdentidad => matches!(digit_count(value), 7 | 8),
            _ => !value.trim().is_empty(),
        }
    }
}

/// Count digits, ignoring common separators. Any other character makes the
/// value malformed.
fn digit_count(value: &str) -> usize {
    let mut count = 0;
    for c in value.chars() {
        if c.is_ascii_digit() {
            count += 1;
        } else if !matches!(c, '.' | '-' | ' ' | '/') {
            return 0;
        }
    }
    count
}

/// Special requirements a receiving institution adds on top of the base
/// legal template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionRule {
    pub institution: Institution,
    /// How long the institution accepts the issued certificate, in days.
    pub validity_days: u32,
    pub special_requirements: Vec<String>,
}

/// The complete, resolved requirement checklist for one certificate request.
///
/// Created once per resolution call and consumed read-only by validation.
/// Document order is presentation priority, not arbitrary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalRequirements {
    pub certificate_type: CertificateType,
    pub purpose: String,
    pub subject_name: String,
    pub mandatory_articles: Vec<Article>,
    pub cross_references: Vec<Article>,
    pub required_documents: Vec<RequiredDocument>,
    pub required_elements: Vec<RequiredElement>,
    pub institution_rules: Vec<InstitutionRule>,
    /// False when the certificate type has no codified template and the
    /// minimal identity/authorisation fallback was used.
    pub rules_codified: bool,
}

impl LegalRequirements {
    /// Human-readable checklist, in Spanish like the issued certificates.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "REQUISITOS LEGALES — {}\n",
            self.certificate_type.as_str()
        ));
        out.push_str(&format!("Solicitante: {}\n", self.subject_name));
        out.push_str(&format!("Destino: {}\n", self.purpose));
        if !self.rules_codified {
            out.push_str("(tipo no codificado: se aplica plantilla mínima)\n");
        }

        let articles: Vec<String> = self.mandatory_articles.iter().map(|a| a.to_string()).collect();
        out.push_str(&format!("Artículos aplicables: {}\n", articles.join(", ")));
        if !self.cross_references.is_empty() {
            let refs: Vec<String> = self.cross_references.iter().map(|a| a.to_string()).collect();
            out.push_str(&format!("Referencias cruzadas: {}\n", refs.join(", ")));
        }

        out.push_str(&format!(
            "\nDocumentos requeridos ({}):\n",
            self.required_documents.len()
        ));
        for doc in &self.required_documents {
            let tag = if doc.mandatory { "OBLIGATORIO" } else { "OPCIONAL" };
            out.push_str(&format!("  [{}] {} — {}", tag, doc.description, doc.legal_basis));
            if let Some(days) = doc.expiry_days {
                out.push_str(&format!(" (vigencia {days} días)"));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "\nElementos requeridos ({}):\n",
            self.required_elements.len()
        ));
        for el in &self.required_elements {
            out.push_str(&format!("  - {} ({})\n", el.display_name(), el.legal_basis()));
        }

        for rule in &self.institution_rules {
            out.push_str(&format!(
                "\nRegla institucional {} (vigencia {} días):\n",
                rule.institution.as_str(),
                rule.validity_days
            ));
            for req in &rule.special_requirements {
                out.push_str(&format!("  * {req}\n"));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rut_format_accepts_separated_digits() {
        assert!(RequiredElement::Rut.format_is_valid("212345678901"));
        assert!(RequiredElement::Rut.format_is_valid("21.234.567.8901"));
        assert!(!RequiredElement::Rut.format_is_valid("21234567890"));
        assert!(!RequiredElement::Rut.format_is_valid("21.234.567.890X"));
    }

    #[test]
    fn cedula_format_accepts_seven_or_eight_digits() {
        assert!(RequiredElement::CedulaIdentidad.format_is_valid("1.234.567-8"));
        assert!(RequiredElement::CedulaIdentidad.format_is_valid("1234567"));
        assert!(!RequiredElement::CedulaIdentidad.format_is_valid("12345"));
    }

    #[test]
    fn free_text_elements_only_need_content() {
        assert!(RequiredElement::RazonSocial.format_is_valid("GIRTEC S.A."));
        assert!(!RequiredElement::RazonSocial.format_is_valid("   "));
    }

    #[test]
    #[should_panic(expected = "expiry_days must be positive")]
    fn zero_expiry_rejected() {
        let _ = RequiredDocument::new(
            DocumentType::CertificadoBps,
            "certificado BPS",
            true,
            LegalBasis::Articulo(Article(248)),
        )
        .expiring(0);
    }

    #[test]
    fn expiring_builder_sets_days() {
        let doc = RequiredDocument::new(
            DocumentType::CertificadoBps,
            "certificado BPS",
            true,
            LegalBasis::Institucional(Institution::Bps),
        )
        .expiring(30);
        assert!(doc.expires());
        assert_eq!(doc.expiry_days, Some(30));
    }
}
