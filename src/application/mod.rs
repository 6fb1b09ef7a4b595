pub mod use_cases;

pub use use_cases::presenter::Presenter;
pub use use_cases::session_handler::SessionHandler;
