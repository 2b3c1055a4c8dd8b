//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    BenefitResponse, CreateBenefitRequest, ErrorResponse, TransferApiRequest, UpdateBenefitRequest,
};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Benefit Ledger API",
        version = "1.0.0",
        description = "Benefit records with version-checked edits and compensated balance transfers.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::benefit::list_benefits,
        crate::gateway::handlers::benefit::list_active_benefits,
        crate::gateway::handlers::benefit::get_benefit,
        crate::gateway::handlers::benefit::search_benefits,
        crate::gateway::handlers::benefit::create_benefit,
        crate::gateway::handlers::benefit::update_benefit,
        crate::gateway::handlers::benefit::deactivate_benefit,
        crate::gateway::handlers::benefit::delete_benefit,
        crate::gateway::handlers::transfer::create_transfer,
    ),
    components(
        schemas(
            HealthResponse,
            BenefitResponse,
            CreateBenefitRequest,
            UpdateBenefitRequest,
            TransferApiRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Benefits", description = "Benefit records: CRUD and search"),
        (name = "Transfer", description = "Value transfer between two active benefits"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
