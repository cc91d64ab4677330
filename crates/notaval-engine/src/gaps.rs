//! Gap analysis: validation failures → prioritised remediation plan.
//!
//! Every [`ValidationIssue`] maps to exactly one [`Gap`] through a fixed
//! severity→priority table, with a single override: legal non-compliance is
//! always URGENT — a legal blocker cannot be downgraded. Two small lookup
//! tables and one explicit check keep the mapping auditable.

use serde::{Deserialize, Serialize};

use crate::validator::{IssueKind, Severity, ValidationIssue, ValidationMatrix};

/// Re-export so consumers can name the gap kind without reaching into the
/// validator module.
pub type GapKind = IssueKind;

/// Remediation priority, URGENT first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl GapPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "URGENTE",
            Self::High => "ALTA",
            Self::Medium => "MEDIA",
            Self::Low => "BAJA",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

/// Fixed severity→priority table.
fn priority_for(severity: Severity) -> GapPriority {
    match severity {
        Severity::Critical => GapPriority::Urgent,
        Severity::Error => GapPriority::High,
        Severity::Warning => GapPriority::Medium,
        Severity::Info => GapPriority::Low,
    }
}

/// One classified, prioritised validation failure with remediation guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub kind: GapKind,
    pub priority: GapPriority,
    pub issue: ValidationIssue,
    pub remediation: String,
    /// Blocks issuance. Set only on URGENT gaps, which keeps
    /// `ready_for_certificate` consistent with the validation gate.
    pub blocking: bool,
}

/// Prioritised remediation plan for one certificate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    /// URGENT first; original requirement order within each tier.
    pub gaps: Vec<Gap>,
    pub urgent_gaps: usize,
    pub ready_for_certificate: bool,
}

impl GapReport {
    pub fn count_by_priority(&self, priority: GapPriority) -> usize {
        self.gaps.iter().filter(|g| g.priority == priority).count()
    }

    /// Human-readable action plan, in Spanish.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("PLAN DE ACCIÓN\n");
        out.push_str(&format!(
            "¿Listo para el certificado?: {}\n",
            if self.ready_for_certificate { "SÍ" } else { "NO" }
        ));
        out.push_str(&format!(
            "Pendientes: {} urgentes, {} altas, {} medias, {} bajas\n",
            self.count_by_priority(GapPriority::Urgent),
            self.count_by_priority(GapPriority::High),
            self.count_by_priority(GapPriority::Medium),
            self.count_by_priority(GapPriority::Low),
        ));

        for (i, gap) in self.gaps.iter().enumerate() {
            out.push_str(&format!(
                "\n{}. [{}] {}\n   {}",
                i + 1,
                gap.priority.as_str(),
                gap.issue.subject,
                gap.remediation
            ));
            if let Some(basis) = &gap.issue.legal_basis {
                out.push_str(&format!(" ({basis})"));
            }
            out.push('\n');
        }

        if self.ready_for_certificate {
            out.push_str("\nTodos los requisitos cumplidos — listo para redactar.\n");
        }

        out
    }
}

/// Derive the prioritised gap report from a validation matrix.
///
/// `ready_for_certificate` and `matrix.can_issue_certificate` are two views
/// of the same CRITICAL-issue set and never disagree.
pub fn analyze(matrix: &ValidationMatrix) -> GapReport {
    let mut gaps: Vec<Gap> = matrix.issues.iter().map(gap_for).collect();
    // Stable: issues already arrive in severity-then-declaration order.
    gaps.sort_by_key(|g| g.priority.rank());

    let urgent_gaps = gaps
        .iter()
        .filter(|g| g.priority == GapPriority::Urgent)
        .count();
    let blocking_high = gaps
        .iter()
        .any(|g| g.priority == GapPriority::High && g.blocking);
    let ready = urgent_gaps == 0 && !blocking_high;

    GapReport {
        gaps,
        urgent_gaps,
        ready_for_certificate: ready,
    }
}

fn gap_for(issue: &ValidationIssue) -> Gap {
    // The one override: legal blockers cannot be downgraded.
    let priority = if issue.kind == IssueKind::LegalNoncompliance {
        GapPriority::Urgent
    } else {
        priority_for(issue.severity)
    };

    Gap {
        kind: issue.kind,
        priority,
        remediation: remediation_for(issue),
        blocking: priority == GapPriority::Urgent,
        issue: issue.clone(),
    }
}

/// Per-kind remediation template, filled with the issue's subject.
fn remediation_for(issue: &ValidationIssue) -> String {
    let subject = &issue.subject;
    match issue.kind {
        IssueKind::MissingDocument => format!("Conseguir y cargar {subject}"),
        IssueKind::ExpiredDocument => format!("Obtener {subject} actualizado"),
        IssueKind::MissingData => {
            format!("Verificar que los documentos incluyan {subject}")
        }
        IssueKind::InconsistentData => {
            format!("Unificar {subject} en todos los documentos")
        }
        IssueKind::IncorrectFormat => format!("Corregir el formato de {subject}"),
        IssueKind::LegalNoncompliance => {
            format!("Satisfacer los requisitos de {subject} antes de emitir")
        }
    }
}
