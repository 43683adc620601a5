//! Typed calls to each backend endpoint.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use spm_model::{
    AnalyzeRequest, AnalyzeResponse, ComplianceHeatmapResponse, ExportRequest, ExportedFile,
    FinalizeRequest, HealthStatus, Result, SimulationRequest, SimulationResult, SpmError,
    UploadedDataset,
};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::disposition::filename_from_content_disposition;
use crate::transport::{FilePart, HttpTransport, Transport};

/// Endpoint paths relative to the base URL.
pub mod endpoints {
    pub const UPLOAD: &str = "/upload";
    pub const ANALYZE: &str = "/analyze";
    pub const FINALIZE: &str = "/finalize";
    pub const COMPLIANCE_HEATMAP: &str = "/compliance_heatmap";
    pub const SIMULATE_POLICY_IMPACT: &str = "/simulate_policy_impact";
    pub const EXPORT_STANDARDIZED: &str = "/export_standardized";
    pub const HEALTH: &str = "/health";
}

/// Typed backend client over an injected [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Builds a client with the production transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Uploads a CSV file and returns the parsed headers and rows.
    pub async fn upload(&self, file: FilePart) -> Result<UploadedDataset> {
        let body = self
            .transport
            .post_multipart(endpoints::UPLOAD, file)
            .await?;
        decode(endpoints::UPLOAD, body)
    }

    /// Requests suggested mappings for the given headers.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        let body = self
            .transport
            .post_json(endpoints::ANALYZE, encode(endpoints::ANALYZE, request)?)
            .await?;
        decode(endpoints::ANALYZE, body)
    }

    /// Persists the final mappings. Only success or failure is reported.
    pub async fn finalize(&self, request: &FinalizeRequest) -> Result<()> {
        let body = self
            .transport
            .post_json(endpoints::FINALIZE, encode(endpoints::FINALIZE, request)?)
            .await?;
        debug!(response = %body, "mappings finalized");
        Ok(())
    }

    pub async fn compliance_heatmap(&self) -> Result<ComplianceHeatmapResponse> {
        let body = self
            .transport
            .get_json(endpoints::COMPLIANCE_HEATMAP)
            .await?;
        decode(endpoints::COMPLIANCE_HEATMAP, body)
    }

    pub async fn simulate_policy_impact(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult> {
        let body = self
            .transport
            .post_json(
                endpoints::SIMULATE_POLICY_IMPACT,
                encode(endpoints::SIMULATE_POLICY_IMPACT, request)?,
            )
            .await?;
        decode(endpoints::SIMULATE_POLICY_IMPACT, body)
    }

    /// Requests the standardized export and returns the file with its name.
    pub async fn export_standardized(&self, request: &ExportRequest) -> Result<ExportedFile> {
        let response = self
            .transport
            .post_json_for_file(
                endpoints::EXPORT_STANDARDIZED,
                encode(endpoints::EXPORT_STANDARDIZED, request)?,
            )
            .await?;
        Ok(ExportedFile {
            filename: filename_from_content_disposition(response.content_disposition.as_deref()),
            bytes: response.bytes,
        })
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let body = self.transport.get_json(endpoints::HEALTH).await?;
        decode(endpoints::HEALTH, body)
    }

    /// Returns whether the backend answers the health check.
    pub async fn test_connection(&self) -> bool {
        match self.health().await {
            Ok(status) => status.is_healthy(),
            Err(error) => {
                warn!(%error, "API connection test failed");
                false
            }
        }
    }
}

fn encode<S: Serialize>(endpoint: &str, request: &S) -> Result<Value> {
    serde_json::to_value(request)
        .map_err(|e| SpmError::validation(format!("could not encode request for {endpoint}: {e}")))
}

fn decode<D: DeserializeOwned>(endpoint: &str, body: Value) -> Result<D> {
    serde_json::from_value(body).map_err(|e| SpmError::shape(endpoint, e.to_string()))
}
