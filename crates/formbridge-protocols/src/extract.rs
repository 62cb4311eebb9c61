//! Extraction seam.

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::types::ExtractionResult;

/// Version of the extraction request/response contract.
pub const EXTRACTION_PROTOCOL_VERSION: u32 = 1;

/// Detects fields in an image and proposes values for them.
///
/// Strict request/response: no streaming, no partial results.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        image: &[u8],
        context: &serde_json::Value,
    ) -> Result<ExtractionResult, ExtractionError>;
}
