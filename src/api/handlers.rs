//! REST API handlers for deployment operations

use crate::cache::PayloadCache;
use crate::config::DeployerConfig;
use crate::contract::ContractData;
use crate::deployer::DeploymentService;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared application state for API handlers
///
/// Each request builds its own [`DeploymentService`]; the payload cache is
/// the only state shared across requests.
#[derive(Clone)]
pub struct ApiState {
    pub config: DeployerConfig,
    pub cache: Arc<PayloadCache>,
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct PrepareResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_data: Option<ContractData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub contract_address: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/prepare-deployment/ - Prepare the deployment payload
pub async fn prepare_deployment(
    State(state): State<ApiState>,
) -> (StatusCode, Json<PrepareResponse>) {
    let service = DeploymentService::new(state.config.clone(), state.cache.clone());

    match service.prepare_deployment().await {
        Ok(contract_data) => (
            StatusCode::OK,
            Json(PrepareResponse {
                success: true,
                contract_data: Some(contract_data),
                error: None,
            }),
        ),
        Err(e) => {
            log::error!("prepare-deployment failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PrepareResponse {
                    success: false,
                    contract_data: None,
                    error: Some(format!("Deployment failed: {}", e)),
                }),
            )
        }
    }
}

/// POST /api/verify-contract/ - Verify a deployed contract
pub async fn verify_contract(
    State(state): State<ApiState>,
    Json(req): Json<VerifyRequest>,
) -> (StatusCode, Json<VerifyResponse>) {
    let service = DeploymentService::new(state.config.clone(), state.cache.clone());

    match service.verify_contract(&req.contract_address).await {
        Ok(()) => (
            StatusCode::OK,
            Json(VerifyResponse {
                success: true,
                error: None,
            }),
        ),
        Err(e) => {
            log::error!("verify-contract failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(VerifyResponse {
                    success: false,
                    error: Some(format!("Verification failed: {}", e)),
                }),
            )
        }
    }
}

/// GET /api/health/ - Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_ok() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "OK");
    }

    #[test]
    fn test_prepare_response_omits_empty_fields() {
        let response = PrepareResponse {
            success: true,
            contract_data: Some(ContractData {
                contract_data_value: "0x9c4d535b".to_string(),
            }),
            error: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["contract_data"]["contract_data_value"], "0x9c4d535b");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_verify_request_shape() {
        let req: VerifyRequest = serde_json::from_str(
            r#"{"contract_address": "0x52fD92aBb519766Ce0D3b163cbB27a3F2b02257f"}"#,
        )
        .unwrap();
        assert_eq!(
            req.contract_address,
            "0x52fD92aBb519766Ce0D3b163cbB27a3F2b02257f"
        );
    }
}
