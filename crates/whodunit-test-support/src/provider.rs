//! Test content providers.

use async_trait::async_trait;

use whodunit_content::prompt::{GenerationPrompt, RevisionPrompt};
use whodunit_content::provider::{MysteryProvider, ProviderError};
use whodunit_content::schema::MysteryPackage;

/// A provider that returns a fixed package on every call.
#[derive(Debug, Clone)]
pub struct CannedProvider {
    package: MysteryPackage,
}

impl CannedProvider {
    #[must_use]
    pub fn new(package: MysteryPackage) -> Self {
        Self { package }
    }
}

#[async_trait]
impl MysteryProvider for CannedProvider {
    async fn generate(
        &self,
        _prompt: GenerationPrompt,
    ) -> Result<MysteryPackage, ProviderError> {
        Ok(self.package.clone())
    }

    async fn revise(&self, _prompt: RevisionPrompt) -> Result<MysteryPackage, ProviderError> {
        Ok(self.package.clone())
    }
}

/// A provider that always fails, for asserting that nothing is persisted on
/// provider failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingProvider;

#[async_trait]
impl MysteryProvider for FailingProvider {
    async fn generate(
        &self,
        _prompt: GenerationPrompt,
    ) -> Result<MysteryPackage, ProviderError> {
        Err(ProviderError::Request("connection refused".into()))
    }

    async fn revise(&self, _prompt: RevisionPrompt) -> Result<MysteryPackage, ProviderError> {
        Err(ProviderError::Request("connection refused".into()))
    }
}
