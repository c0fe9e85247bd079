use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Assistant,
    Clinician,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Assistant => "assistant",
            Role::Clinician => "clinician",
        }
    }

    /// Convert enum → DB string (`login.funcao`)
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Assistant => "Assistente",
            Role::Clinician => "Psicóloga",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Assistente" => Some(Role::Assistant),
            "Psicóloga" | "Psicólogo" => Some(Role::Clinician),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "assistant" | "a" | "assistente" => Some(Role::Assistant),
            "clinician" | "c" | "psicóloga" | "psicologa" | "psicólogo" | "psicologo" => {
                Some(Role::Clinician)
            }
            _ => None,
        }
    }
}
