pub mod error_reporter;
pub mod presenter;
pub mod session_handler;
pub mod statistics;
