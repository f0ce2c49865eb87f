//! External data-source clients
//!
//! Each role agent calls exactly one of these. The coordinator never sees
//! them; provider failures surface only as per-role failure markers.

pub mod amadeus;
pub mod llm;
pub mod weather;

pub use amadeus::AmadeusClient;
pub use llm::{ChatMessage, LlmClient, ProviderConfig};
pub use weather::WeatherClient;
