//! Requirements resolution: intent → concrete legal checklist.

use std::collections::BTreeSet;

use notaval_core::kb;
use notaval_core::{
    Article, CertificateIntent, IntentError, LegalRequirements, RequiredDocument,
    RequiredElement, match_institutions,
};

/// Resolve a certificate intent into its legal requirement checklist.
///
/// Total over the closed certificate/institution taxonomies: every
/// structurally valid intent resolves. Un-codified types degrade to the
/// minimal template, unmatched purposes simply add no institution rule.
pub fn resolve(intent: &CertificateIntent) -> Result<LegalRequirements, IntentError> {
    intent.check()?;

    let template = kb::base_template(intent.certificate_type);
    if !template.codified {
        tracing::info!(
            certificate_type = intent.certificate_type.as_str(),
            "certificate type not codified, using minimal template"
        );
    }

    let institutions = match_institutions(&intent.purpose);
    if institutions.is_empty() {
        tracing::info!(purpose = %intent.purpose, "no institution matched purpose");
    }

    let mut documents = template.documents;
    let mut elements = template.elements;
    let mut institution_rules = Vec::new();

    for institution in &institutions {
        let Some(reqs) = kb::institution_requirements(institution) else {
            continue;
        };
        for doc in reqs.documents {
            merge_document(&mut documents, doc);
        }
        for el in reqs.elements {
            merge_element(&mut elements, el);
        }
        institution_rules.push(reqs.rule);
    }

    let cross_references = cross_reference_closure(&template.mandatory_articles);

    Ok(LegalRequirements {
        certificate_type: intent.certificate_type,
        purpose: intent.purpose.clone(),
        subject_name: intent.subject_name.clone(),
        mandatory_articles: template.mandatory_articles,
        cross_references,
        required_documents: documents,
        required_elements: elements,
        institution_rules,
        rules_codified: template.codified,
    })
}

/// Merge an institution document into the list, deduplicating by document
/// type. The more restrictive expiry wins; mandatory wins over optional. The
/// base entry keeps its citation and institution scope so evidence that
/// satisfied the base requirement still counts.
fn merge_document(documents: &mut Vec<RequiredDocument>, incoming: RequiredDocument) {
    match documents
        .iter_mut()
        .find(|d| d.document_type == incoming.document_type)
    {
        Some(existing) => {
            existing.mandatory = existing.mandatory || incoming.mandatory;
            existing.expiry_days = match (existing.expiry_days, incoming.expiry_days) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }
        None => documents.push(incoming),
    }
}

fn merge_element(elements: &mut Vec<RequiredElement>, incoming: RequiredElement) {
    if !elements.contains(&incoming) {
        elements.push(incoming);
    }
}

/// Fixed closure: article 130 plus every article explicitly cross-referenced
/// by a mandatory article, minus the mandatory articles themselves.
fn cross_reference_closure(mandatory: &[Article]) -> Vec<Article> {
    let mut refs: BTreeSet<Article> = BTreeSet::new();
    refs.insert(Article(130));
    for article in mandatory {
        for n in article.cross_references() {
            refs.insert(Article(*n));
        }
    }
    for article in mandatory {
        refs.remove(article);
    }
    refs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notaval_core::{
        CertificateType, DocumentType, Institution, LegalBasis, SubjectType,
    };

    fn intent(ct: CertificateType, purpose: &str) -> CertificateIntent {
        CertificateIntent {
            certificate_type: ct,
            purpose: purpose.to_string(),
            subject_name: "GIRTEC S.A.".to_string(),
            subject_type: SubjectType::PersonaJuridica,
            additional_notes: None,
        }
    }

    #[test]
    fn personeria_for_bps_gets_institution_rule() {
        let reqs = resolve(&intent(CertificateType::PersoneriaJuridica, "BPS")).unwrap();
        assert_eq!(reqs.institution_rules.len(), 1);
        assert_eq!(reqs.institution_rules[0].institution, Institution::Bps);
        assert_eq!(reqs.institution_rules[0].validity_days, 30);
        assert!(reqs
            .required_documents
            .iter()
            .any(|d| d.document_type == DocumentType::CertificadoBps && d.mandatory));
    }

    #[test]
    fn zona_franca_vigencia_comes_from_institution_rule() {
        let base = resolve(&intent(CertificateType::PersoneriaJuridica, "uso interno")).unwrap();
        assert!(!base
            .required_documents
            .iter()
            .any(|d| d.document_type == DocumentType::CertificadoVigencia));

        let zf = resolve(&intent(CertificateType::PersoneriaJuridica, "zona franca")).unwrap();
        assert!(zf
            .required_documents
            .iter()
            .any(|d| d.document_type == DocumentType::CertificadoVigencia && d.mandatory));
    }

    #[test]
    fn unmatched_purpose_adds_no_rule() {
        let reqs = resolve(&intent(CertificateType::Firma, "uso personal")).unwrap();
        assert!(reqs.institution_rules.is_empty());
    }

    #[test]
    fn empty_purpose_resolves_to_base_template() {
        let reqs = resolve(&intent(CertificateType::PersoneriaJuridica, "")).unwrap();
        assert!(reqs.institution_rules.is_empty());
        assert!(reqs
            .required_documents
            .iter()
            .any(|d| d.document_type == DocumentType::Estatuto && d.mandatory));
    }

    #[test]
    fn compound_purpose_applies_all_matching_rules() {
        let reqs = resolve(&intent(CertificateType::PersoneriaJuridica, "BPS y DGI")).unwrap();
        let insts: Vec<&Institution> = reqs
            .institution_rules
            .iter()
            .map(|r| &r.institution)
            .collect();
        assert_eq!(insts, vec![&Institution::Bps, &Institution::Dgi]);
        assert!(reqs
            .required_documents
            .iter()
            .any(|d| d.document_type == DocumentType::CertificadoDgi));
    }

    #[test]
    fn merge_keeps_stricter_expiry() {
        // RUPE re-adds the BPS certificate with its own citation; resolving
        // "BPS y RUPE" must keep a single entry with the 30-day window.
        let reqs = resolve(&intent(CertificateType::PersoneriaJuridica, "BPS y RUPE")).unwrap();
        let bps_docs: Vec<&RequiredDocument> = reqs
            .required_documents
            .iter()
            .filter(|d| d.document_type == DocumentType::CertificadoBps)
            .collect();
        assert_eq!(bps_docs.len(), 1);
        assert_eq!(bps_docs[0].expiry_days, Some(30));
        assert!(bps_docs[0].mandatory);
    }

    #[test]
    fn otros_resolves_to_minimal_template() {
        let reqs = resolve(&intent(CertificateType::Otros, "uso personal")).unwrap();
        assert!(!reqs.rules_codified);
        assert_eq!(reqs.mandatory_articles, vec![Article(130)]);
        assert!(reqs
            .required_documents
            .iter()
            .any(|d| d.document_type == DocumentType::CedulaIdentidad && d.mandatory));
    }

    #[test]
    fn cross_references_always_include_130_unless_mandatory() {
        let reqs = resolve(&intent(CertificateType::PersoneriaJuridica, "BPS")).unwrap();
        assert!(reqs.cross_references.contains(&Article(130)));
        assert!(!reqs.cross_references.contains(&Article(248)));

        let otros = resolve(&intent(CertificateType::Otros, "uso personal")).unwrap();
        // 130 is mandatory for the fallback template, so it leaves the set.
        assert!(!otros.cross_references.contains(&Article(130)));
    }

    #[test]
    fn representation_cross_references_248_basis() {
        // Art. 250 explicitly references Art. 248, which is already mandatory;
        // Art. 253 references 250 but 253 is not selected here.
        let reqs = resolve(&intent(CertificateType::Representacion, "uso interno")).unwrap();
        assert_eq!(reqs.cross_references, vec![Article(130)]);
    }

    #[test]
    fn structurally_invalid_intent_fails() {
        let mut bad = intent(CertificateType::Firma, "BSE");
        bad.subject_name = " ".to_string();
        assert!(resolve(&bad).is_err());
    }

    #[test]
    fn base_citations_survive_institution_merge() {
        let reqs = resolve(&intent(CertificateType::Firma, "abitab")).unwrap();
        let cedula = reqs
            .required_documents
            .iter()
            .find(|d| d.document_type == DocumentType::CedulaIdentidad)
            .unwrap();
        // Abitab also demands the cédula; the base Art. 252 citation stays.
        assert_eq!(cedula.legal_basis, LegalBasis::Articulo(Article(252)));
        assert!(cedula.institution_specific.is_none());
    }
}
