use serde::Serialize;

/// Weekday a client is usually scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedulingDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Undefined,
}

impl SchedulingDay {
    pub fn label(&self) -> &'static str {
        match self {
            SchedulingDay::Monday => "Monday",
            SchedulingDay::Tuesday => "Tuesday",
            SchedulingDay::Wednesday => "Wednesday",
            SchedulingDay::Thursday => "Thursday",
            SchedulingDay::Friday => "Friday",
            SchedulingDay::Undefined => "Undefined",
        }
    }

    /// Convert enum → DB string (`clientes.dia_agendamento`)
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SchedulingDay::Monday => "Segunda-feira",
            SchedulingDay::Tuesday => "Terça-feira",
            SchedulingDay::Wednesday => "Quarta-feira",
            SchedulingDay::Thursday => "Quinta-feira",
            SchedulingDay::Friday => "Sexta-feira",
            SchedulingDay::Undefined => "Indefinido",
        }
    }

    /// Convert DB string → enum; unknown values fall back to `Undefined`.
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "Segunda-feira" => SchedulingDay::Monday,
            "Terça-feira" => SchedulingDay::Tuesday,
            "Quarta-feira" => SchedulingDay::Wednesday,
            "Quinta-feira" => SchedulingDay::Thursday,
            "Sexta-feira" => SchedulingDay::Friday,
            _ => SchedulingDay::Undefined,
        }
    }

    /// Helper: convert input code from CLI
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "mon" | "monday" | "segunda" | "segunda-feira" => Some(SchedulingDay::Monday),
            "tue" | "tuesday" | "terça" | "terca" | "terça-feira" => Some(SchedulingDay::Tuesday),
            "wed" | "wednesday" | "quarta" | "quarta-feira" => Some(SchedulingDay::Wednesday),
            "thu" | "thursday" | "quinta" | "quinta-feira" => Some(SchedulingDay::Thursday),
            "fri" | "friday" | "sexta" | "sexta-feira" => Some(SchedulingDay::Friday),
            "undefined" | "none" | "indefinido" => Some(SchedulingDay::Undefined),
            _ => None,
        }
    }
}
