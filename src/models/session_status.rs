use serde::Serialize;

/// Outcome of a scheduled appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionStatus {
    Realized, // realizada
    Missed,   // falta (legacy: cancelada)
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Realized => "realized",
            SessionStatus::Missed => "missed",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionStatus::Realized => "realizada",
            SessionStatus::Missed => "falta",
        }
    }

    /// Convert DB string → enum.
    /// `cancelada` rows predate the missed-appointment terminology and are
    /// read as missed.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "realizada" => Some(SessionStatus::Realized),
            "falta" | "cancelada" => Some(SessionStatus::Missed),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (any case, English or Portuguese)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "realized" | "done" | "r" | "realizada" => Some(SessionStatus::Realized),
            "missed" | "m" | "falta" | "cancelled" | "canceled" | "cancelada" => {
                Some(SessionStatus::Missed)
            }
            _ => None,
        }
    }

    pub fn is_realized(&self) -> bool {
        matches!(self, SessionStatus::Realized)
    }
}
