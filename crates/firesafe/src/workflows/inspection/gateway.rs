use async_trait::async_trait;

use super::payload::InspectionPayload;

/// Status the remote answers with once the inspection is stored.
pub const CREATED: u16 = 201;

/// Outbound boundary for inspection submissions.
#[async_trait]
pub trait InspectionGateway: Send + Sync {
    /// Send the payload, returning the HTTP status the remote answered with.
    async fn submit_inspection(&self, payload: &InspectionPayload) -> Result<u16, GatewayError>;
}

/// The submission never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("could not read image {handle}: {source}")]
    Image {
        handle: String,
        #[source]
        source: std::io::Error,
    },
    #[error("inspection transport unavailable: {0}")]
    Transport(String),
}
