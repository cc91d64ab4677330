//! Decision pipeline: resolver → validation engine → gap engine.
//!
//! Each stage is a pure function over its inputs; outputs are immutable and
//! re-derivable. Data flows one direction only.

pub mod gaps;
pub mod resolver;
pub mod validator;

pub use gaps::{Gap, GapKind, GapPriority, GapReport, analyze};
pub use resolver::resolve;
pub use validator::{
    DocumentCheck, ElementCheck, IssueKind, Severity, ValidationIssue, ValidationMatrix,
    validate, validate_at,
};
