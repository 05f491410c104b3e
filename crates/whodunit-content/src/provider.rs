//! The content provider contract.
//!
//! A provider is a pure adapter around one long-latency external call. It
//! never retries internally and surfaces failures as a distinct error kind;
//! callers must not hold locks across it and treat the result as an
//! immutable local copy.

use async_trait::async_trait;
use thiserror::Error;

use whodunit_core::error::DomainError;

use crate::prompt::{GenerationPrompt, RevisionPrompt};
use crate::schema::MysteryPackage;

/// Failure surfaced by a content provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The call itself failed (connect, timeout, non-2xx status).
    #[error("provider request failed: {0}")]
    Request(String),

    /// The provider answered, but the payload did not conform to the
    /// Mystery Package schema.
    #[error("provider returned non-conforming data: {0}")]
    Schema(String),
}

impl From<ProviderError> for DomainError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}

/// An AI content provider invoked as an opaque function: structured prompt
/// in, schema-conforming package (or failure) out.
#[async_trait]
pub trait MysteryProvider: Send + Sync {
    /// Generate a fresh candidate package.
    async fn generate(&self, prompt: GenerationPrompt)
    -> Result<MysteryPackage, ProviderError>;

    /// Re-run generation with a host edit instruction against the current
    /// story context.
    async fn revise(&self, prompt: RevisionPrompt) -> Result<MysteryPackage, ProviderError>;
}
