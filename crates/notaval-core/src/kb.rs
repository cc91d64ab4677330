//! Static legal knowledge base.
//!
//! Pure data, no behaviour: per-certificate-type base templates (documents,
//! mandatory articles, required data elements) and per-institution special
//! rules. Read-only after startup; the resolver composes these tables into a
//! [`crate::requirements::LegalRequirements`].

use crate::article::{Article, LegalBasis};
use crate::evidence::DocumentType;
use crate::institution::Institution;
use crate::intent::CertificateType;
use crate::requirements::{InstitutionRule, RequiredDocument, RequiredElement};

/// Base requirement template for one certificate type.
pub struct BaseTemplate {
    pub mandatory_articles: Vec<Article>,
    pub documents: Vec<RequiredDocument>,
    pub elements: Vec<RequiredElement>,
    /// False for the minimal fallback applied to un-codified types.
    pub codified: bool,
}

/// Extra requirements a receiving institution imposes.
pub struct InstitutionRequirements {
    pub rule: InstitutionRule,
    pub documents: Vec<RequiredDocument>,
    pub elements: Vec<RequiredElement>,
}

fn doc(t: DocumentType, desc: &str, mandatory: bool, article: u16) -> RequiredDocument {
    RequiredDocument::new(t, desc, mandatory, LegalBasis::Articulo(Article(article)))
}

fn inst_doc(t: DocumentType, desc: &str, institution: Institution) -> RequiredDocument {
    RequiredDocument::new(t, desc, true, LegalBasis::Institucional(institution))
}

/// Base template lookup. Total over the closed certificate taxonomy; the
/// `Otros` arm is the minimal identity + authorisation fallback.
pub fn base_template(certificate_type: CertificateType) -> BaseTemplate {
    use CertificateType::*;
    use RequiredElement::*;

    match certificate_type {
        Firma => BaseTemplate {
            mandatory_articles: vec![Article(252)],
            documents: vec![doc(
                DocumentType::CedulaIdentidad,
                "cédula de identidad del firmante",
                true,
                252,
            )],
            elements: vec![CedulaIdentidad],
            codified: true,
        },
        PersoneriaJuridica => BaseTemplate {
            mandatory_articles: vec![Article(248), Article(249)],
            documents: vec![
                doc(DocumentType::Estatuto, "estatuto social", true, 248),
                doc(
                    DocumentType::CertificadoRegistro,
                    "certificado del Registro de Comercio",
                    true,
                    249,
                ),
                doc(
                    DocumentType::ActaDirectorio,
                    "acta de directorio con designación de autoridades",
                    false,
                    248,
                ),
            ],
            elements: vec![RazonSocial, Rut, InscripcionRegistro],
            codified: true,
        },
        Representacion => BaseTemplate {
            mandatory_articles: vec![Article(248), Article(250)],
            documents: vec![
                doc(DocumentType::Estatuto, "estatuto social", true, 248),
                doc(
                    DocumentType::ActaDirectorio,
                    "acta de directorio con distribución de cargos",
                    true,
                    250,
                ),
                doc(DocumentType::PoderVigente, "poder vigente", false, 253),
            ],
            elements: vec![RazonSocial, RepresentanteLegal],
            codified: true,
        },
        SituacionJuridica => BaseTemplate {
            mandatory_articles: vec![Article(249), Article(255)],
            documents: vec![
                doc(DocumentType::Estatuto, "estatuto social", true, 255),
                doc(
                    DocumentType::CertificadoRegistro,
                    "certificado del Registro de Comercio",
                    true,
                    249,
                )
                .expiring(30),
            ],
            elements: vec![RazonSocial, InscripcionRegistro],
            codified: true,
        },
        Vigencia => BaseTemplate {
            mandatory_articles: vec![Article(249), Article(251)],
            documents: vec![doc(
                DocumentType::CertificadoRegistro,
                "certificado del Registro de Comercio",
                true,
                251,
            )
            .expiring(30)],
            elements: vec![RazonSocial, InscripcionRegistro],
            codified: true,
        },
        CartaPoder => BaseTemplate {
            mandatory_articles: vec![Article(253)],
            documents: vec![doc(
                DocumentType::CedulaIdentidad,
                "cédula de identidad del poderdante",
                true,
                253,
            )],
            elements: vec![CedulaIdentidad],
            codified: true,
        },
        PoderGeneral => BaseTemplate {
            mandatory_articles: vec![Article(253)],
            documents: vec![
                doc(
                    DocumentType::CedulaIdentidad,
                    "cédula de identidad del poderdante",
                    true,
                    253,
                ),
                doc(
                    DocumentType::Estatuto,
                    "estatuto social (si el poderdante es persona jurídica)",
                    false,
                    248,
                ),
            ],
            elements: vec![CedulaIdentidad],
            codified: true,
        },
        PoderJudicial => BaseTemplate {
            mandatory_articles: vec![Article(253)],
            documents: vec![
                doc(
                    DocumentType::CedulaIdentidad,
                    "cédula de identidad del poderdante",
                    true,
                    253,
                ),
                doc(DocumentType::PoderVigente, "poder anterior, si existe", false, 253),
            ],
            elements: vec![CedulaIdentidad],
            codified: true,
        },
        Declaracion => BaseTemplate {
            mandatory_articles: vec![Article(254)],
            documents: vec![doc(
                DocumentType::CedulaIdentidad,
                "cédula de identidad del declarante",
                true,
                254,
            )],
            elements: vec![CedulaIdentidad],
            codified: true,
        },
        Otros => BaseTemplate {
            mandatory_articles: vec![Article(130)],
            documents: vec![
                doc(
                    DocumentType::CedulaIdentidad,
                    "cédula de identidad del interesado",
                    true,
                    130,
                ),
                doc(
                    DocumentType::PoderVigente,
                    "documento de autorización, si actúa por otro",
                    false,
                    130,
                ),
            ],
            elements: vec![CedulaIdentidad],
            codified: false,
        },
    }
}

/// Institution rule lookup. `None` for institutions without codified rules
/// (including `Otra`); institution rules are additive, never mandatory.
pub fn institution_requirements(institution: &Institution) -> Option<InstitutionRequirements> {
    use Institution::*;
    use RequiredElement::*;

    let reqs = match institution {
        Bps => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Bps,
                validity_days: 30,
                special_requirements: vec![
                    "Certificado común BPS vigente (máximo 30 días)".to_string(),
                ],
            },
            documents: vec![
                inst_doc(DocumentType::CertificadoBps, "certificado BPS", Bps)
                    .expiring(30)
                    .institution_specific(Bps),
            ],
            elements: vec![Rut],
        },
        Dgi => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Dgi,
                validity_days: 30,
                special_requirements: vec![
                    "Constancia DGI al día (máximo 30 días)".to_string(),
                ],
            },
            documents: vec![
                inst_doc(DocumentType::CertificadoDgi, "constancia DGI", Dgi)
                    .expiring(30)
                    .institution_specific(Dgi),
            ],
            elements: vec![Rut],
        },
        Bse => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Bse,
                validity_days: 30,
                special_requirements: vec![
                    "Indicar número de póliza o trámite BSE en el certificado".to_string(),
                ],
            },
            documents: vec![],
            elements: vec![],
        },
        Bcu => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Bcu,
                validity_days: 30,
                special_requirements: vec![
                    "Acuse de recibo BCU cuando corresponda".to_string(),
                ],
            },
            documents: vec![
                inst_doc(
                    DocumentType::CertificadoRegistro,
                    "certificado registral actualizado",
                    Bcu,
                )
                .expiring(90),
            ],
            elements: vec![RazonSocial],
        },
        Abitab => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Abitab,
                validity_days: 60,
                special_requirements: vec![
                    "Trámite de firma digital requiere presencia del titular".to_string(),
                ],
            },
            documents: vec![inst_doc(
                DocumentType::CedulaIdentidad,
                "cédula de identidad vigente del titular",
                Abitab,
            )],
            elements: vec![CedulaIdentidad],
        },
        Rupe => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Rupe,
                validity_days: 90,
                special_requirements: vec![
                    "Inscripción RUPE requiere certificados BPS y DGI vigentes".to_string(),
                ],
            },
            documents: vec![
                inst_doc(DocumentType::CertificadoBps, "certificado BPS", Rupe)
                    .expiring(30)
                    .institution_specific(Bps),
                inst_doc(DocumentType::CertificadoDgi, "constancia DGI", Rupe)
                    .expiring(30)
                    .institution_specific(Dgi),
            ],
            elements: vec![Rut],
        },
        ZonaFranca => InstitutionRequirements {
            rule: InstitutionRule {
                institution: ZonaFranca,
                validity_days: 90,
                special_requirements: vec![
                    "Certificado de vigencia del contrato de usuario de Zona Franca".to_string(),
                ],
            },
            documents: vec![
                inst_doc(
                    DocumentType::CertificadoVigencia,
                    "certificado de vigencia de usuario de Zona Franca",
                    ZonaFranca,
                )
                .expiring(90)
                .institution_specific(ZonaFranca),
            ],
            elements: vec![RazonSocial],
        },
        Mtop => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Mtop,
                validity_days: 60,
                special_requirements: vec![
                    "Inscripción vigente en el Registro Nacional de Empresas (MTOP)".to_string(),
                ],
            },
            documents: vec![RequiredDocument::new(
                DocumentType::ConstanciaDomicilio,
                "constancia de domicilio de la empresa",
                false,
                LegalBasis::Institucional(Mtop),
            )],
            elements: vec![],
        },
        Banco => InstitutionRequirements {
            rule: InstitutionRule {
                institution: Banco,
                validity_days: 30,
                special_requirements: vec![
                    "Verificar requisitos particulares del banco receptor".to_string(),
                ],
            },
            documents: vec![],
            elements: vec![],
        },
        Otra(_) => return None,
    };

    Some(reqs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_certificate_type_has_a_mandatory_document() {
        for ct in [
            CertificateType::Firma,
            CertificateType::PersoneriaJuridica,
            CertificateType::Representacion,
            CertificateType::SituacionJuridica,
            CertificateType::Vigencia,
            CertificateType::CartaPoder,
            CertificateType::PoderGeneral,
            CertificateType::PoderJudicial,
            CertificateType::Declaracion,
            CertificateType::Otros,
        ] {
            let template = base_template(ct);
            assert!(
                !template.mandatory_articles.is_empty(),
                "{ct:?} has no articles"
            );
            assert!(
                template.documents.iter().any(|d| d.mandatory),
                "{ct:?} has no mandatory document"
            );
        }
    }

    #[test]
    fn otros_falls_back_to_minimal_template() {
        let template = base_template(CertificateType::Otros);
        assert!(!template.codified);
        assert_eq!(template.mandatory_articles, vec![Article(130)]);
    }

    #[test]
    fn bps_rule_has_thirty_day_validity() {
        let reqs = institution_requirements(&Institution::Bps).unwrap();
        assert_eq!(reqs.rule.validity_days, 30);
        let cert = &reqs.documents[0];
        assert_eq!(cert.document_type, DocumentType::CertificadoBps);
        assert_eq!(cert.expiry_days, Some(30));
        assert!(cert.mandatory);
    }

    #[test]
    fn zona_franca_adds_vigencia_certificate() {
        let reqs = institution_requirements(&Institution::ZonaFranca).unwrap();
        assert!(reqs
            .documents
            .iter()
            .any(|d| d.document_type == DocumentType::CertificadoVigencia && d.mandatory));
    }

    #[test]
    fn uncodified_institution_has_no_rule() {
        assert!(institution_requirements(&Institution::Otra("Intendencia".into())).is_none());
    }

    #[test]
    fn expiring_institution_documents_have_positive_expiry() {
        for inst in [
            Institution::Bps,
            Institution::Dgi,
            Institution::Bse,
            Institution::Bcu,
            Institution::Abitab,
            Institution::Rupe,
            Institution::ZonaFranca,
            Institution::Mtop,
            Institution::Banco,
        ] {
            if let Some(reqs) = institution_requirements(&inst) {
                for d in &reqs.documents {
                    if let Some(days) = d.expiry_days {
                        assert!(days >= 1);
                    }
                }
            }
        }
    }
}
