//! HTTP Layer - JSON API + 对象存储静态文件

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiJson};
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, Ports};
