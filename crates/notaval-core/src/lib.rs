pub mod article;
pub mod error;
pub mod evidence;
pub mod institution;
pub mod intent;
pub mod kb;
pub mod requirements;

pub use article::{Article, LegalBasis};
pub use error::IntentError;
pub use evidence::{DocumentType, ExtractedDocument, ExtractionResult};
pub use institution::{Institution, match_institutions};
pub use intent::{CertificateIntent, CertificateType, SubjectType};
pub use requirements::{
    InstitutionRule, LegalRequirements, RequiredDocument, RequiredElement,
};
