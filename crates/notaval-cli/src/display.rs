//! Terminal rendering of pipeline artifacts.

use notaval_core::LegalRequirements;
use notaval_engine::{GapReport, ValidationMatrix};

fn print_framed(title: &str, body: &str) {
    println!("=== {title} ===");
    println!();
    println!("{body}");
}

pub fn print_requirements(requirements: &LegalRequirements) {
    print_framed(&requirements.subject_name, &requirements.summary());
}

pub fn print_matrix(matrix: &ValidationMatrix) {
    print_framed("Validación", &matrix.summary());
}

pub fn print_report(matrix: &ValidationMatrix, report: &GapReport) {
    print_framed("Validación", &matrix.summary());
    print_framed("Plan de acción", &report.summary());
}
