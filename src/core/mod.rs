pub mod access;
pub mod assessment;
pub mod backup;
pub mod calculator;
pub mod client;
pub mod document;
pub mod log;
pub mod report;
pub mod session;
pub mod user;
