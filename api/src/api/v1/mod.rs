use std::sync::Arc;

use common::http::ext::OptionExt;
use common::http::RouteError;
use hyper::{Body, Request, StatusCode};
use routerify::ext::RequestExt;
use routerify::Router;

use crate::api::error::{ApiError, Result};
use crate::api::middleware::auth::AuthUser;
use crate::global::GlobalState;
use crate::social::PageRequest;

pub mod content;
pub mod health;
pub mod jwt;
pub mod social;

pub fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    Router::builder()
        .scope("/health", health::routes(global))
        .scope("/social", social::routes(global))
        .scope("/content", content::routes(global))
        .build()
        .expect("failed to build router")
}

/// The authenticated caller, or a 401 when the auth middleware attached none.
pub fn auth_user(req: &Request<Body>) -> Result<AuthUser> {
    req.context::<AuthUser>()
        .map_err_route((StatusCode::UNAUTHORIZED, "you need to be logged in"))
}

/// A required `i64` path parameter.
pub fn param_i64(req: &Request<Body>, name: &str) -> Result<i64> {
    let raw = req
        .param(name)
        .map_err_route((StatusCode::BAD_REQUEST, format!("missing {name}")))?;

    raw.parse()
        .map_err(|_| RouteError::from((StatusCode::BAD_REQUEST, format!("invalid {name}"))))
}

/// The query-string parameters the list endpoints share. Unknown keys are
/// ignored; malformed values are a 400.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub q: Option<String>,
}

impl ListQuery {
    pub fn parse(req: &Request<Body>) -> Result<Self> {
        let Some(query) = req.uri().query() else {
            return Ok(Self::default());
        };

        url::form_urlencoded::parse(query.as_bytes()).try_fold(
            Self::default(),
            |mut parsed, (key, value)| {
                match key.as_ref() {
                    "page" => {
                        parsed.page = Some(value.parse().map_err(|_| {
                            RouteError::from((
                                StatusCode::BAD_REQUEST,
                                format!("invalid page value: {value}"),
                            ))
                        })?);
                    }
                    "limit" => {
                        parsed.limit = Some(value.parse().map_err(|_| {
                            RouteError::from((
                                StatusCode::BAD_REQUEST,
                                format!("invalid limit value: {value}"),
                            ))
                        })?);
                    }
                    "category" => parsed.category = Some(value.to_string()),
                    "q" => parsed.q = Some(value.to_string()),
                    _ => {}
                }

                Ok(parsed)
            },
        )
    }

    pub fn page_request(&self, default_limit: u32) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(default_limit))
    }
}
