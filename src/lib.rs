pub mod config;
pub mod db;
pub mod http_client;
pub mod models;
pub mod schema;
pub mod server;
pub mod sync;
pub mod upload;
