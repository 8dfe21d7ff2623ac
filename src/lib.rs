pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod registry;
pub mod server;
pub mod sftp;
