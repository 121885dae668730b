mod config;
mod mcp;
mod schemas;

pub use config::{Config, FunctionsConfig, OracleConfig, ServerConfig};
pub use mcp::{run_until_cancelled, McpServer};
pub use schemas::*;
