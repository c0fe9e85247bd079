use serde::Serialize;

/// Folder a client document is filed under in object storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentType {
    Questionnaires,
    CorrectedTests,
    Reports,
    Contract,
    Invoices,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Questionnaires,
        DocumentType::CorrectedTests,
        DocumentType::Reports,
        DocumentType::Contract,
        DocumentType::Invoices,
    ];

    /// Folder name used in storage keys.
    pub fn folder(&self) -> &'static str {
        match self {
            DocumentType::Questionnaires => "Questionários",
            DocumentType::CorrectedTests => "Testes Corrigidos",
            DocumentType::Reports => "Laudos",
            DocumentType::Contract => "Contrato",
            DocumentType::Invoices => "Notas Fiscais",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "questionnaires" | "questionnaire" | "questionários" | "questionarios" => {
                Some(DocumentType::Questionnaires)
            }
            "tests" | "corrected-tests" | "testes corrigidos" | "testes-corrigidos" => {
                Some(DocumentType::CorrectedTests)
            }
            "reports" | "report" | "laudos" => Some(DocumentType::Reports),
            "contract" | "contrato" => Some(DocumentType::Contract),
            "invoices" | "invoice" | "notas fiscais" | "notas-fiscais" => {
                Some(DocumentType::Invoices)
            }
            _ => None,
        }
    }
}

/// Category of practice-wide template documents (`modelos/` prefix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemplateType {
    Tests,
    Reports,
    Contracts,
}

impl TemplateType {
    pub fn folder(&self) -> &'static str {
        match self {
            TemplateType::Tests => "Testes",
            TemplateType::Reports => "Laudos",
            TemplateType::Contracts => "Contratos",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "tests" | "testes" => Some(TemplateType::Tests),
            "reports" | "laudos" => Some(TemplateType::Reports),
            "contracts" | "contratos" => Some(TemplateType::Contracts),
            _ => None,
        }
    }
}
