use pfo_challenges::error::OptimizerError;
use pfo_structs::{
    api::ErrorResp,
    error::{BodyError, FieldError},
};
use warp::{
    http::StatusCode,
    reply::{self, Reply, Response},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NotFound,
    MethodNotAllowed,
    Forbidden(String),
    MalformedRequest(BodyError),
    Validation(FieldError),
    Precondition(OptimizerError),
    TooLarge(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Precondition(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_resp(&self) -> ErrorResp {
        match self {
            ApiError::Internal(details) => {
                ErrorResp::with_details("Internal server error", details.clone())
            }
            _ => ErrorResp::new(self.to_string()),
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        reply::with_status(reply::json(&self.to_resp()), self.status()).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "Endpoint not found"),
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::Forbidden(reason) => write!(f, "{}", reason),
            ApiError::MalformedRequest(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Precondition(e) => write!(f, "{}", e),
            ApiError::TooLarge(reason) => write!(f, "{}", reason),
            ApiError::Internal(details) => write!(f, "Internal server error: {}", details),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<BodyError> for ApiError {
    fn from(e: BodyError) -> Self {
        ApiError::MalformedRequest(e)
    }
}

impl From<FieldError> for ApiError {
    fn from(e: FieldError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<OptimizerError> for ApiError {
    fn from(e: OptimizerError) -> Self {
        match e {
            OptimizerError::TableTooLarge { .. } => ApiError::TooLarge(e.to_string()),
            _ => ApiError::Precondition(e),
        }
    }
}
