pub mod categories;
pub mod config;
pub mod draw;
pub mod list;
pub mod saved;
pub mod share;
pub mod status;
