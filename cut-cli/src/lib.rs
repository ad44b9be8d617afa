pub mod commands;
pub mod config;
pub mod csv_loader;
pub mod form;
pub mod logging;
pub mod session;
pub mod utils;

pub use config::AppConfig;
pub use form::BillCutForm;
