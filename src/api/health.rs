use crate::catalog;
use crate::types::dto::common::{AboutResponse, HealthResponse};
use chrono::Utc;
use poem_openapi::{payload::Json, OpenApi, Tags};

/// Health check API
pub struct HealthApi;

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Returns the current status of the API service
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    /// Static description of the service
    #[oai(path = "/about", method = "get", tag = "ApiTags::Health")]
    async fn about(&self) -> Json<AboutResponse> {
        Json(AboutResponse {
            name: "PlayRate".to_string(),
            description: "Browse a curated game catalog, read aggregated review \
                          verdicts, and post your own reviews."
                .to_string(),
            catalog_size: catalog::GAMES.len() as u32,
        })
    }
}
