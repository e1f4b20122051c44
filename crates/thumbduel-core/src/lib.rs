//! thumbduel-core - Thumbnail A/B comparison via structured LLM output.
//!
//! Takes two candidate thumbnails with their titles, sends them to the
//! Gemini vision API with a strict response schema, and parses the scored
//! verdict. One stateless request/response exchange per call: no retries,
//! no caching, no server-side persistence.
//!
//! # Architecture
//!
//! ```text
//! Request → validate → resolve credential → build payload (prompt + schema)
//!         → one HTTPS call (bounded deadline) → parse against contract
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use thumbduel_core::{
//!     AnalysisClient, AnalysisRequest, CredentialResolver, HttpTransport,
//!     ImageInput, SettingsStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), thumbduel_core::AnalysisError> {
//!     let store = SettingsStore::new();
//!     let client = AnalysisClient::new(
//!         CredentialResolver::with_default_sources(store),
//!         Box::new(HttpTransport::default()),
//!     );
//!
//!     let request = AnalysisRequest {
//!         image_a: ImageInput::from_bytes(&std::fs::read("a.png").unwrap(), "png"),
//!         image_b: ImageInput::from_bytes(&std::fs::read("b.png").unwrap(), "png"),
//!         title_a: "Candidate A".into(),
//!         title_b: "Candidate B".into(),
//!     };
//!     let verdict = client.analyze(&request).await?;
//!     println!("Winner: {:?}", verdict.winner);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod client;
pub mod config;
pub mod contract;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod types;

// Re-exports for convenient access
pub use client::{AnalysisClient, AnalyzeOptions};
pub use config::{Config, GeminiConfig, LoggingConfig};
pub use contract::{AnalysisVerdict, Winner};
pub use credentials::{
    Credential, CredentialResolver, CredentialSource, EnvSource, SettingsSource, SettingsStore,
    StaticSource,
};
pub use error::{AnalysisError, CallResult, ConfigError, Result, ThumbduelError};
pub use gemini::{AnalysisTransport, HttpTransport};
pub use types::{AnalysisRequest, ImageInput};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
