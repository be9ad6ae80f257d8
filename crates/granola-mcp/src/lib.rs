//! Model Context Protocol server exposing Granola notes over stdio.

pub mod jsonrpc;
pub mod server;
pub mod stdio;
pub mod tools;

pub use server::McpServer;
pub use stdio::{run_stdio, serve};
