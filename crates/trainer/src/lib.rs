pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod oracle;
pub mod practice;
pub mod render;
pub mod session;
