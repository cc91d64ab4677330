use thiserror::Error;

/// Structural input errors. These fail the resolution call fast and loud.
///
/// Domain-data gaps (missing documents, expired documents, inconsistent
/// fields) are never errors — they surface as `ValidationIssue` records.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("subject name is empty")]
    MissingSubjectName,
}
