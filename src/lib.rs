pub mod client;
pub mod config;
pub mod lead;
pub mod server;
pub mod source;
pub mod tui;
