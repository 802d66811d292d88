pub mod import_service;
pub mod save_service;
pub mod summary_service;
pub mod user_service;
