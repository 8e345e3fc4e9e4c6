pub mod server;

pub use server::{RunMode, ServerConfig};
