//! Certificate request intents.
//!
//! A `CertificateIntent` is the structured form captured from the client:
//! which certificate they need, for which receiving institution, and for
//! which subject. The certificate taxonomy is closed so that requirements
//! resolution is a total function — unknown requests land on [`CertificateType::Otros`]
//! instead of failing.

use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// Closed set of notarial certificate types handled by the office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateType {
    /// Certificación de firma.
    Firma,
    /// Certificado de personería jurídica.
    PersoneriaJuridica,
    /// Certificado de representación.
    Representacion,
    /// Certificado de situación jurídica.
    SituacionJuridica,
    /// Certificado de vigencia.
    Vigencia,
    /// Carta poder.
    CartaPoder,
    /// Poder general.
    PoderGeneral,
    /// Poder para pleitos.
    PoderJudicial,
    /// Declaración ante escribano.
    Declaracion,
    /// Anything not yet codified; resolves to a minimal template.
    Otros,
}

impl CertificateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Firma => "certificación de firma",
            Self::PersoneriaJuridica => "certificado de personería jurídica",
            Self::Representacion => "certificado de representación",
            Self::SituacionJuridica => "certificado de situación jurídica",
            Self::Vigencia => "certificado de vigencia",
            Self::CartaPoder => "carta poder",
            Self::PoderGeneral => "poder general",
            Self::PoderJudicial => "poder para pleitos",
            Self::Declaracion => "declaración",
            Self::Otros => "otros",
        }
    }
}

/// Whether the certificate subject is a natural or legal person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    PersonaFisica,
    PersonaJuridica,
}

/// A concrete certificate request, as captured from the client.
///
/// Immutable once created; the resolver reads it, nothing mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateIntent {
    pub certificate_type: CertificateType,
    /// Free-text destination, e.g. "para Abitab" or "BPS y DGI".
    /// Normalised by [`crate::institution::match_institutions`].
    pub purpose: String,
    pub subject_name: String,
    pub subject_type: SubjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl CertificateIntent {
    /// Check structural validity. Syntactically valid intents always resolve;
    /// an empty subject name is the one fatal input shape. An empty purpose
    /// is fine — it simply matches no institution.
    pub fn check(&self) -> Result<(), IntentError> {
        if self.subject_name.trim().is_empty() {
            return Err(IntentError::MissingSubjectName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(subject: &str, purpose: &str) -> CertificateIntent {
        CertificateIntent {
            certificate_type: CertificateType::Firma,
            purpose: purpose.to_string(),
            subject_name: subject.to_string(),
            subject_type: SubjectType::PersonaFisica,
            additional_notes: None,
        }
    }

    #[test]
    fn valid_intent_passes() {
        assert!(intent("Juan Pérez", "BSE").check().is_ok());
    }

    #[test]
    fn empty_subject_rejected() {
        assert!(matches!(
            intent("   ", "BSE").check(),
            Err(IntentError::MissingSubjectName)
        ));
    }

    #[test]
    fn empty_purpose_is_not_structural() {
        assert!(intent("Juan Pérez", "").check().is_ok());
    }

    #[test]
    fn certificate_type_round_trips_through_json() {
        let json = serde_json::to_string(&CertificateType::PersoneriaJuridica).unwrap();
        assert_eq!(json, "\"personeria_juridica\"");
        let back: CertificateType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CertificateType::PersoneriaJuridica);
    }
}
