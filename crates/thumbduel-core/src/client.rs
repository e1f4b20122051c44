//! The analysis client: one stateless request/response exchange per call.
//!
//! No retries, no caching, no rate limiting. Every failure propagates to
//! the caller as a distinct [`AnalysisError`] variant; deciding what to
//! show the user (and whether to retry manually) is the caller's job.

use crate::contract::{self, AnalysisVerdict};
use crate::credentials::CredentialResolver;
use crate::error::AnalysisError;
use crate::gemini::AnalysisTransport;
use crate::prompt;
use crate::types::{AnalysisRequest, ImageInput};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-call options.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Deadline on the single suspension point (the service round-trip)
    pub timeout_ms: u64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self { timeout_ms: 45_000 }
    }
}

/// Client for the thumbnail comparison service.
///
/// Holds no per-request state; concurrent `analyze` calls are independent
/// and share only the resolver's read path.
pub struct AnalysisClient {
    resolver: CredentialResolver,
    transport: Arc<dyn AnalysisTransport>,
    options: AnalyzeOptions,
}

impl AnalysisClient {
    pub fn new(resolver: CredentialResolver, transport: Box<dyn AnalysisTransport>) -> Self {
        Self::with_options(resolver, transport, AnalyzeOptions::default())
    }

    pub fn with_options(
        resolver: CredentialResolver,
        transport: Box<dyn AnalysisTransport>,
        options: AnalyzeOptions,
    ) -> Self {
        Self {
            resolver,
            transport: Arc::from(transport),
            options,
        }
    }

    /// Run one comparison.
    ///
    /// Order matters: input validation happens before credential
    /// resolution, and both happen before any network I/O. The await on
    /// the transport is bounded by `options.timeout_ms`; dropping the
    /// returned future cancels the call at that same point.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisVerdict, AnalysisError> {
        request.validate()?;

        let credential = self
            .resolver
            .resolve()
            .ok_or(AnalysisError::MissingCredential)?;

        let body = prompt::build_payload(request)?;

        let start = Instant::now();
        let text = tokio::time::timeout(
            Duration::from_millis(self.options.timeout_ms),
            self.transport.execute(&body, &credential),
        )
        .await
        .map_err(|_| AnalysisError::Timeout {
            timeout_ms: self.options.timeout_ms,
        })??;

        let verdict = contract::parse_verdict(&text)?;
        tracing::debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            winner = ?verdict.winner,
            "Thumbnail comparison complete"
        );
        Ok(verdict)
    }

    /// Convenience entry point for callers holding data-URL strings, as a
    /// browser-side collaborator would.
    pub async fn analyze_data_urls(
        &self,
        image_a: &str,
        image_b: &str,
        title_a: &str,
        title_b: &str,
    ) -> Result<AnalysisVerdict, AnalysisError> {
        let request = AnalysisRequest {
            image_a: ImageInput::from_data_url(image_a),
            image_b: ImageInput::from_data_url(image_b),
            title_a: title_a.to_string(),
            title_b: title_b.to_string(),
        };
        self.analyze(&request).await
    }
}
