pub mod dark_mode_store;
pub mod error;
