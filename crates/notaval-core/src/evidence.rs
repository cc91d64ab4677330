//! Extracted document evidence, as delivered by the intake/extraction layer.
//!
//! These records are consumed read-only: the validation engine never mutates
//! evidence, it only reads it against a resolved requirement checklist.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::institution::Institution;

/// Document types the intake layer can detect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Estatuto social.
    Estatuto,
    /// Acta de directorio.
    ActaDirectorio,
    /// Certificado del Registro de Comercio.
    CertificadoRegistro,
    /// Certificado común BPS.
    CertificadoBps,
    /// Constancia/certificado DGI.
    CertificadoDgi,
    /// Certificado de vigencia emitido por un tercero (p. ej. Zona Franca).
    CertificadoVigencia,
    /// Cédula de identidad.
    CedulaIdentidad,
    /// Poder vigente.
    PoderVigente,
    /// Constancia de domicilio.
    ConstanciaDomicilio,
    Otro,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Estatuto => "estatuto",
            Self::ActaDirectorio => "acta de directorio",
            Self::CertificadoRegistro => "certificado de Registro de Comercio",
            Self::CertificadoBps => "certificado BPS",
            Self::CertificadoDgi => "certificado DGI",
            Self::CertificadoVigencia => "certificado de vigencia",
            Self::CedulaIdentidad => "cédula de identidad",
            Self::PoderVigente => "poder vigente",
            Self::ConstanciaDomicilio => "constancia de domicilio",
            Self::Otro => "otro documento",
        }
    }
}

/// One uploaded document after type detection and field extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// File identity assigned at intake (filename or storage key).
    pub id: String,
    pub detected_type: DocumentType,
    /// Issuing institution, when the intake layer could determine it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_institution: Option<Institution>,
    /// Canonical field key → raw extracted value. BTreeMap keeps the
    /// serialised form deterministic.
    #[serde(default)]
    pub extracted_fields: BTreeMap<String, String>,
    /// Upload or last-modification timestamp; absent means age unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_scanned: bool,
}

impl ExtractedDocument {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extracted_fields
            .get(key)
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

/// The full extraction output for one certificate request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub documents: Vec<ExtractedDocument>,
}

impl ExtractionResult {
    /// Documents of a given detected type, in upload order.
    pub fn of_type(&self, doc_type: &DocumentType) -> impl Iterator<Item = &ExtractedDocument> {
        self.documents
            .iter()
            .filter(move |d| d.detected_type == *doc_type)
    }
}
