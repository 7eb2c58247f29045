pub mod codec;
pub mod commands;
pub mod config;
pub mod connection;
pub mod error;
pub mod frame;
pub mod reply;
pub mod request;
pub mod server;
pub mod store;
pub mod types;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
