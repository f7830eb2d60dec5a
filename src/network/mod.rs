// Re-export network modules
pub mod chat_client;
pub mod config;
pub mod sse;

// Re-export commonly used items
pub use chat_client::ChatClient;
pub use config::init_chat_config;
