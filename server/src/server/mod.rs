mod asset_request_server;
pub use asset_request_server::AssetRequestServer;

mod server_config;
pub use server_config::{FencingFailurePolicy, ServerConfig};

mod inline_requests;
