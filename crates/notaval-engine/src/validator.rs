//! Validation engine: evidence against a resolved requirement checklist.
//!
//! Five checks, in fixed order: document presence, expiry, required data
//! elements, cross-document consistency, article-level legal compliance.
//! Every finding becomes a [`ValidationIssue`]; domain gaps are records, not
//! errors. The single authoritative gate is `can_issue_certificate`: true iff
//! no CRITICAL issue exists.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use notaval_core::institution::fold;
use notaval_core::{
    Article, DocumentType, ExtractedDocument, ExtractionResult, LegalBasis, LegalRequirements,
    RequiredDocument, RequiredElement,
};

/// Severity of a validation issue. Only CRITICAL blocks issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks certificate issuance.
    Critical,
    /// Must be fixed before drafting.
    Error,
    /// Recommended to fix.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "crítico",
            Self::Error => "error",
            Self::Warning => "advertencia",
            Self::Info => "info",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Error => 1,
            Self::Warning => 2,
            Self::Info => 3,
        }
    }
}

/// Lineage of a validation issue; carried through to the gap report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingDocument,
    ExpiredDocument,
    MissingData,
    InconsistentData,
    IncorrectFormat,
    LegalNoncompliance,
}

/// One validation finding with its legal citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// What the issue is about: document description, element name, article.
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_basis: Option<LegalBasis>,
    /// Id of the evidence document involved, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

/// Status row for one required document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCheck {
    pub document_type: DocumentType,
    pub description: String,
    pub mandatory: bool,
    pub present: bool,
    /// `None` when the document does not expire or its age is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

impl DocumentCheck {
    /// Whether the underlying requirement is satisfied by the evidence.
    pub fn satisfied(&self) -> bool {
        self.present && self.expired != Some(true)
    }
}

/// Status row for one required data element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementCheck {
    pub element: RequiredElement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_found: Option<String>,
    pub satisfied: bool,
}

/// Complete validation verdict for one certificate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMatrix {
    /// Date the evidence was evaluated against (expiry arithmetic).
    pub reference_date: NaiveDate,
    pub document_checks: Vec<DocumentCheck>,
    pub element_checks: Vec<ElementCheck>,
    /// All issues, ordered by severity then requirement declaration order.
    pub issues: Vec<ValidationIssue>,
    /// True iff no CRITICAL issue exists. The one authoritative gate.
    pub can_issue_certificate: bool,
}

impl ValidationMatrix {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn critical_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
    }

    /// Human-readable summary, in Spanish like the issued certificates.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("MATRIZ DE VALIDACIÓN\n");
        out.push_str(&format!("Fecha de referencia: {}\n", self.reference_date));
        out.push_str(&format!(
            "¿Puede emitir certificado?: {}\n\n",
            if self.can_issue_certificate { "SÍ" } else { "NO" }
        ));
        out.push_str(&format!(
            "Problemas: {} críticos, {} errores, {} advertencias, {} info\n",
            self.count_by_severity(Severity::Critical),
            self.count_by_severity(Severity::Error),
            self.count_by_severity(Severity::Warning),
            self.count_by_severity(Severity::Info),
        ));

        out.push_str(&format!(
            "\nDocumentos ({}):\n",
            self.document_checks.len()
        ));
        for check in &self.document_checks {
            let tag = if check.mandatory { "REQUERIDO" } else { "OPCIONAL" };
            let state = if !check.present {
                "FALTANTE"
            } else if check.expired == Some(true) {
                "VENCIDO"
            } else {
                "PRESENTE"
            };
            out.push_str(&format!("  [{}] {} — {}\n", tag, check.description, state));
        }

        out.push_str(&format!("\nElementos ({}):\n", self.element_checks.len()));
        for check in &self.element_checks {
            let state = if check.satisfied { "OK" } else { "FALTA" };
            out.push_str(&format!(
                "  {} — {}{}\n",
                check.element.display_name(),
                state,
                check
                    .value_found
                    .as_deref()
                    .map(|v| format!(" (valor: {v})"))
                    .unwrap_or_default()
            ));
        }

        if !self.issues.is_empty() {
            out.push_str(&format!("\nDetalle ({} problemas):\n", self.issues.len()));
            for issue in &self.issues {
                out.push_str(&format!(
                    "  [{}] {}: {}",
                    issue.severity.as_str().to_uppercase(),
                    issue.subject,
                    issue.message
                ));
                if let Some(basis) = &issue.legal_basis {
                    out.push_str(&format!(" ({basis})"));
                }
                out.push('\n');
            }
        }

        out
    }
}

/// Validate with today as the reference date.
pub fn validate(
    requirements: &LegalRequirements,
    extraction: &ExtractionResult,
) -> ValidationMatrix {
    validate_at(requirements, extraction, Utc::now().date_naive())
}

/// Validate evidence against requirements at a fixed reference date.
///
/// Deterministic: identical inputs yield a structurally identical matrix.
pub fn validate_at(
    requirements: &LegalRequirements,
    extraction: &ExtractionResult,
    reference_date: NaiveDate,
) -> ValidationMatrix {
    let mut issues = Vec::new();

    let document_checks =
        check_documents(requirements, extraction, reference_date, &mut issues);
    let element_checks = check_elements(requirements, extraction, &mut issues);
    check_consistency(requirements, extraction, &mut issues);
    check_articles(requirements, &document_checks, &element_checks, &mut issues);

    // Stable sort: severity rank first, declaration order preserved within.
    issues.sort_by_key(|i| i.severity.rank());

    let can_issue = !issues.iter().any(|i| i.severity == Severity::Critical);
    tracing::debug!(
        issues = issues.len(),
        can_issue_certificate = can_issue,
        "validation complete"
    );

    ValidationMatrix {
        reference_date,
        document_checks,
        element_checks,
        issues,
        can_issue_certificate: can_issue,
    }
}

// ── Presence and expiry ──

/// An institution-specific requirement tolerates an unknown issuer (the
/// intake layer often cannot determine one); only a known, different issuer
/// disqualifies the document.
fn issuer_matches(req: &RequiredDocument, doc: &ExtractedDocument) -> bool {
    match (&req.institution_specific, &doc.issuing_institution) {
        (Some(inst), Some(issuer)) => issuer == inst,
        _ => true,
    }
}

fn check_documents(
    requirements: &LegalRequirements,
    extraction: &ExtractionResult,
    reference_date: NaiveDate,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<DocumentCheck> {
    let mut checks = Vec::with_capacity(requirements.required_documents.len());

    for req in &requirements.required_documents {
        let candidates: Vec<&ExtractedDocument> = extraction
            .of_type(&req.document_type)
            .filter(|d| issuer_matches(req, d))
            .collect();
        let present = !candidates.is_empty();

        if !present {
            issues.push(ValidationIssue {
                kind: IssueKind::MissingDocument,
                severity: if req.mandatory {
                    Severity::Critical
                } else {
                    Severity::Warning
                },
                subject: req.description.clone(),
                message: if req.mandatory {
                    format!("falta documento obligatorio: {}", req.description)
                } else {
                    format!("falta documento opcional: {}", req.description)
                },
                legal_basis: Some(req.legal_basis.clone()),
                evidence: None,
            });
            checks.push(DocumentCheck {
                document_type: req.document_type.clone(),
                description: req.description.clone(),
                mandatory: req.mandatory,
                present: false,
                expired: None,
            });
            continue;
        }

        let expired = match req.expiry_days {
            Some(limit) => check_expiry(req, &candidates, limit, reference_date, issues),
            None => None,
        };

        checks.push(DocumentCheck {
            document_type: req.document_type.clone(),
            description: req.description.clone(),
            mandatory: req.mandatory,
            present: true,
            expired,
        });
    }

    checks
}

/// Expiry check over the freshest dated candidate. A document aged exactly
/// `limit` days is still valid; `limit + 1` is expired. Unknown age (no
/// timestamp on any candidate) is a WARNING, never a silent pass.
fn check_expiry(
    req: &RequiredDocument,
    candidates: &[&ExtractedDocument],
    limit: u32,
    reference_date: NaiveDate,
    issues: &mut Vec<ValidationIssue>,
) -> Option<bool> {
    let freshest = candidates
        .iter()
        .filter_map(|d| d.uploaded_at.map(|t| (t, *d)))
        .max_by_key(|(t, _)| *t);

    let Some((uploaded_at, doc)) = freshest else {
        issues.push(ValidationIssue {
            kind: IssueKind::MissingData,
            severity: Severity::Warning,
            subject: req.description.clone(),
            message: format!(
                "no se pudo determinar la antigüedad de {} (vigencia {limit} días)",
                req.description
            ),
            legal_basis: Some(req.legal_basis.clone()),
            evidence: candidates.first().map(|d| d.id.clone()),
        });
        return None;
    };

    let age_days = (reference_date - uploaded_at.date_naive()).num_days();
    let expired = age_days > i64::from(limit);
    if expired {
        issues.push(ValidationIssue {
            kind: IssueKind::ExpiredDocument,
            severity: if req.mandatory {
                Severity::Critical
            } else {
                Severity::Error
            },
            subject: req.description.clone(),
            message: format!(
                "{} vencido: {age_days} días de antigüedad, máximo {limit}",
                req.description
            ),
            legal_basis: Some(req.legal_basis.clone()),
            evidence: Some(doc.id.clone()),
        });
    }
    Some(expired)
}

// ── Required elements ──

fn check_elements(
    requirements: &LegalRequirements,
    extraction: &ExtractionResult,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<ElementCheck> {
    let mut checks = Vec::with_capacity(requirements.required_elements.len());

    for element in &requirements.required_elements {
        let found: Vec<(&str, &str)> = extraction
            .documents
            .iter()
            .filter_map(|d| d.field(element.key()).map(|v| (d.id.as_str(), v)))
            .collect();

        let valid = found
            .iter()
            .find(|(_, v)| element.format_is_valid(v));

        match (found.first(), valid) {
            (_, Some((_, value))) => checks.push(ElementCheck {
                element: *element,
                value_found: Some((*value).to_string()),
                satisfied: true,
            }),
            (Some((doc_id, value)), None) => {
                issues.push(ValidationIssue {
                    kind: IssueKind::IncorrectFormat,
                    severity: Severity::Error,
                    subject: element.display_name().to_string(),
                    message: format!(
                        "{} con formato inválido: {value}",
                        element.display_name()
                    ),
                    legal_basis: Some(LegalBasis::Articulo(element.legal_basis())),
                    evidence: Some((*doc_id).to_string()),
                });
                checks.push(ElementCheck {
                    element: *element,
                    value_found: Some((*value).to_string()),
                    satisfied: false,
                });
            }
            (None, _) => {
                issues.push(ValidationIssue {
                    kind: IssueKind::MissingData,
                    severity: Severity::Error,
                    subject: element.display_name().to_string(),
                    message: format!(
                        "no se encontró {} en los documentos",
                        element.display_name()
                    ),
                    legal_basis: Some(LegalBasis::Articulo(element.legal_basis())),
                    evidence: None,
                });
                checks.push(ElementCheck {
                    element: *element,
                    value_found: None,
                    satisfied: false,
                });
            }
        }
    }

    checks
}

// ── Cross-document consistency ──

/// Semantic fields compared across documents, with their normalisation.
const CONSISTENCY_FIELDS: &[RequiredElement] =
    &[RequiredElement::RazonSocial, RequiredElement::Rut];

fn normalize_field(element: RequiredElement, value: &str) -> String {
    match element {
        // RUT separators vary per issuer; compare digits only.
        RequiredElement::Rut => value.chars().filter(|c| c.is_ascii_digit()).collect(),
        _ => fold(value),
    }
}

/// Exact match after normalisation is required; no fuzzy matching, so real
/// discrepancies are never masked.
fn check_consistency(
    requirements: &LegalRequirements,
    extraction: &ExtractionResult,
    issues: &mut Vec<ValidationIssue>,
) {
    for element in CONSISTENCY_FIELDS {
        let values: Vec<(&str, String, &str)> = extraction
            .documents
            .iter()
            .filter_map(|d| {
                d.field(element.key())
                    .map(|v| (d.id.as_str(), normalize_field(*element, v), v))
            })
            .collect();

        let mut distinct: Vec<&str> = Vec::new();
        for (_, normalized, _) in &values {
            if !distinct.contains(&normalized.as_str()) {
                distinct.push(normalized);
            }
        }
        if distinct.len() <= 1 {
            continue;
        }

        let raw: Vec<&str> = values.iter().map(|(_, _, v)| *v).collect();
        let mandatory = requirements.required_elements.contains(element);
        issues.push(ValidationIssue {
            kind: IssueKind::InconsistentData,
            severity: if mandatory {
                Severity::Error
            } else {
                Severity::Warning
            },
            subject: element.display_name().to_string(),
            message: format!(
                "{} inconsistente entre documentos: {}",
                element.display_name(),
                raw.join(" / ")
            ),
            legal_basis: Some(LegalBasis::Articulo(element.legal_basis())),
            evidence: values.first().map(|(id, _, _)| (*id).to_string()),
        });
    }
}

// ── Article-level legal compliance ──

/// Terminal legality gate: every mandatory article must be covered by at
/// least one satisfied requirement, independent of document bookkeeping.
fn check_articles(
    requirements: &LegalRequirements,
    document_checks: &[DocumentCheck],
    element_checks: &[ElementCheck],
    issues: &mut Vec<ValidationIssue>,
) {
    for article in &requirements.mandatory_articles {
        let covered_by_document = requirements
            .required_documents
            .iter()
            .zip(document_checks)
            .any(|(req, check)| {
                req.legal_basis == LegalBasis::Articulo(*article) && check.satisfied()
            });
        let covered_by_element = element_checks
            .iter()
            .any(|c| c.element.legal_basis() == *article && c.satisfied);

        if !covered_by_document && !covered_by_element {
            issues.push(ValidationIssue {
                kind: IssueKind::LegalNoncompliance,
                severity: Severity::Critical,
                subject: article.to_string(),
                message: format!(
                    "ningún requisito satisfecho acredita {} ({})",
                    article,
                    article.title().unwrap_or("artículo no codificado")
                ),
                legal_basis: Some(LegalBasis::Articulo(*article)),
                evidence: None,
            });
        }
    }
}
