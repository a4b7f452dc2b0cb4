// nukiweb-api: Async Rust client for the Nuki Web smartlock API
//
// Stateless wrapper over `reqwest`: bearer-token auth, fixed base URL,
// status code translation, and the wire models for `/smartlock`.

pub mod client;
pub mod error;
pub mod models;
mod smartlock;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, NukiWebClient};
pub use error::Error;
pub use models::{
    Smartlock, SmartlockAdvancedConfig, SmartlockConfig, SmartlockId, SmartlockState,
};
pub use transport::TransportConfig;
