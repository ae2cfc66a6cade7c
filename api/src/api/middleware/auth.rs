use std::sync::Arc;

use common::http::ext::RequestGlobalExt;
use common::http::RouteError;
use hyper::http::header;
use hyper::{Body, StatusCode};
use routerify::prelude::RequestExt;
use routerify::Middleware;

use crate::api::error::ApiError;
use crate::api::v1::jwt::JwtState;
use crate::global::GlobalState;

/// The authenticated caller, extracted from the identity provider's JWT.
/// Handlers that require auth read this from the request context.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
}

/// Verifies the `Authorization` header when present and attaches the caller
/// to the request. A missing header is not an error here; handlers decide
/// whether auth is required.
pub fn auth_middleware(_global: &Arc<GlobalState>) -> Middleware<Body, RouteError<ApiError>> {
    Middleware::pre(|req| async move {
        let Some(token) = req.headers().get(header::AUTHORIZATION) else {
            return Ok(req);
        };

        let global = req.get_global::<GlobalState>()?;

        let token = token
            .to_str()
            .map_err(|_| RouteError::from((StatusCode::UNAUTHORIZED, "invalid authentication token")))?;

        let Some(token) = token.strip_prefix("Bearer ") else {
            return Err((StatusCode::UNAUTHORIZED, "invalid authentication token").into());
        };

        let jwt = JwtState::verify(&global.config, token)
            .ok_or((StatusCode::UNAUTHORIZED, "invalid authentication token"))?;

        req.set_context(AuthUser { id: jwt.user_id });

        Ok(req)
    })
}
