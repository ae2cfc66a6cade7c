use common::http::RouteError;
use common::make_response;
use hyper::{Body, StatusCode};
use serde_json::json;

use crate::social::{gate, SocialError};

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to parse http body: {0}")]
    ParseHttpBody(#[from] hyper::Error),
    #[error("failed to parse json: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("social error: {0}")]
    Social(#[from] SocialError),
}

impl From<SocialError> for RouteError<ApiError> {
    #[track_caller]
    fn from(err: SocialError) -> Self {
        match err {
            SocialError::Validation(message) => (StatusCode::BAD_REQUEST, message).into(),
            SocialError::SelfFollow => {
                (StatusCode::BAD_REQUEST, "you cannot follow yourself").into()
            }
            SocialError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{what} not found")).into()
            }
            SocialError::AlreadyFollowing => {
                (StatusCode::CONFLICT, "already following this user").into()
            }
            SocialError::GateLocked => RouteError::from(make_response!(
                StatusCode::FORBIDDEN,
                json!({
                    "message": gate::LOCKED_REASON,
                    "success": false,
                    "locked": true,
                })
            )),
            SocialError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error", err).into()
            }
        }
    }
}
