use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hoaxcheck_classifiers::{BundleStatus, Evaluation};
use hoaxcheck_core::{Domain, Error};
use serde::{Deserialize, Serialize};

// ============================================================================
// Error mapping
// ============================================================================

/// Request failures, each rendered as `{"error": kind, "message": ...}`
#[derive(Debug)]
pub enum ApiError {
    /// The service rejected the request
    Evaluation(Error),

    /// The body was not a valid evaluation request
    InvalidRequest(JsonRejection),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Evaluation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            Self::Evaluation(err) => {
                let status = match err {
                    Error::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
                    Error::UnknownDomain(_) => StatusCode::NOT_FOUND,
                    Error::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.kind(), err.to_string())
            }
            Self::InvalidRequest(rejection) => {
                (rejection.status(), "invalid_request", rejection.body_text())
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": kind,
                "message": message,
            })),
        )
            .into_response()
    }
}

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Domain endpoints
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DomainInfo {
    pub domain: Domain,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub async fn list_domains(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry();
    let domains: Vec<DomainInfo> = registry
        .domains()
        .into_iter()
        .filter_map(|domain| {
            let info = match registry.status(domain)? {
                BundleStatus::Ready(bundle) => DomainInfo {
                    domain,
                    status: "ready",
                    version: bundle.version().map(str::to_string),
                    vocabulary_size: Some(bundle.vocabulary_size()),
                    reason: None,
                },
                BundleStatus::Failed(reason) => DomainInfo {
                    domain,
                    status: "unavailable",
                    version: None,
                    vocabulary_size: None,
                    reason: Some(reason.clone()),
                },
            };
            Some(info)
        })
        .collect();

    Json(serde_json::json!({ "domains": domains }))
}

// ============================================================================
// Evaluation endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub text: String,
    pub domain: String,
    #[serde(default)]
    pub highlight: bool,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub evaluation: Evaluation,

    /// Probability of the predicted label
    pub confidence: f64,
}

pub async fn evaluate(
    State(state): State<AppState>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Json(req) = body?;
    let top_n = req
        .highlight
        .then(|| req.top_n.unwrap_or(state.default_top_n));

    let evaluation = state
        .service
        .evaluate_named(&req.text, &req.domain, top_n)?;

    Ok(Json(EvaluateResponse {
        confidence: evaluation.result.confidence(),
        evaluation,
    }))
}
