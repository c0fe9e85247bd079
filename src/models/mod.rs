pub mod assessment;
pub mod client;
pub mod document_type;
pub mod financial_summary;
pub mod money;
pub mod period;
pub mod role;
pub mod scheduling_day;
pub mod session;
pub mod session_status;
pub mod user;

pub use money::Money;
pub use period::Period;
