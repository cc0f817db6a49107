pub mod config;
pub mod credentials;
pub mod http;
pub mod middleware;
pub mod repositories;
