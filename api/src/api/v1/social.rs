use std::sync::Arc;

use common::http::ext::RequestGlobalExt;
use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::ext::RequestExt;
use routerify::Router;
use serde_json::json;

use super::{auth_user, param_i64, ListQuery};
use crate::api::error::{ApiError, Result};
use crate::global::GlobalState;
use crate::social::{graph, search, suggestions};

async fn follow(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let target = param_i64(&req, "id")?;

    let edge = graph::follow(&global.store, auth.id, target).await?;

    Ok(make_response!(
        StatusCode::CREATED,
        json!({
            "success": true,
            "follow_id": edge.id,
            "followed_at": edge.created_at,
        })
    ))
}

async fn unfollow(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let target = param_i64(&req, "id")?;

    graph::unfollow(&global.store, auth.id, target).await?;

    Ok(make_response!(
        StatusCode::OK,
        json!({ "success": true, "message": "unfollowed" })
    ))
}

/// The subject of a follower/following listing: the `:id` parameter when
/// present, otherwise the caller themselves.
fn subject_id(req: &Request<Body>, auth: i64) -> Result<i64> {
    match req.param("id") {
        Some(_) => param_i64(req, "id"),
        None => Ok(auth),
    }
}

async fn followers(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let subject = subject_id(&req, auth.id)?;
    let query = ListQuery::parse(&req)?;

    let users = graph::followers(&global.store, subject, auth.id, query.page_request(20)).await?;

    Ok(make_response!(StatusCode::OK, json!({ "followers": users })))
}

async fn following(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let subject = subject_id(&req, auth.id)?;
    let query = ListQuery::parse(&req)?;

    let users = graph::following(&global.store, subject, auth.id, query.page_request(20)).await?;

    Ok(make_response!(StatusCode::OK, json!({ "following": users })))
}

async fn stats(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;

    let stats = graph::stats(&global.store, auth.id).await?;

    Ok(make_response!(StatusCode::OK, json!(stats)))
}

async fn profile(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let subject = param_i64(&req, "id")?;

    let profile = graph::profile(&global.store, auth.id, subject).await?;

    Ok(make_response!(StatusCode::OK, json!({ "user": profile })))
}

async fn search_users(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let query = ListQuery::parse(&req)?;

    let results = search::users(
        &global.store,
        auth.id,
        query.q.as_deref().unwrap_or(""),
        query.page_request(20),
    )
    .await?;

    Ok(make_response!(StatusCode::OK, json!({ "users": results })))
}

async fn suggest(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let query = ListQuery::parse(&req)?;

    let limit = query.limit.map_or(suggestions::DEFAULT_LIMIT, |l| l as usize);
    let results = suggestions::follow_candidates(&global.store, auth.id, limit).await?;

    Ok(make_response!(StatusCode::OK, json!({ "suggestions": results })))
}

pub fn routes(_global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    Router::builder()
        .post("/follow/:id", follow)
        .delete("/unfollow/:id", unfollow)
        .get("/followers", followers)
        .get("/followers/:id", followers)
        .get("/following", following)
        .get("/following/:id", following)
        .get("/stats", stats)
        .get("/search", search_users)
        .get("/suggestions", suggest)
        .get("/profile/:id", profile)
        .build()
        .expect("failed to build router")
}
