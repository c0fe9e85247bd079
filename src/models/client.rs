use super::{money::Money, scheduling_day::SchedulingDay};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: i64,
    pub name: String,                   // ⇔ clientes.nome (UNIQUE)
    pub session_price: Money,           // ⇔ clientes.valor_sessao
    pub clinician_id: Option<i64>,      // ⇔ clientes.psicologo_responsavel
    pub scheduling_day: SchedulingDay,  // ⇔ clientes.dia_agendamento
}
