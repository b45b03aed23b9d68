use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Static service description for the about page
#[derive(Object, Debug)]
pub struct AboutResponse {
    /// Service name
    pub name: String,

    /// What the service does
    pub description: String,

    /// Number of games in the catalog
    pub catalog_size: u32,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Generic acknowledgement for state-changing endpoints
#[derive(Object, Debug)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
}
