use std::sync::Arc;

use chrono::Utc;
use common::http::ext::{RequestGlobalExt, ResultExt};
use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::Router;
use serde::Deserialize;
use serde_json::json;

use super::{auth_user, param_i64, ListQuery};
use crate::api::error::{ApiError, Result};
use crate::global::GlobalState;
use crate::social::feed::FeedFilter;
use crate::social::{content, feed, gate};
use crate::store::NewContentItem;

#[derive(Debug, Deserialize)]
struct RecordRequest {
    category: String,
    description: String,
    file_path: String,
    file_size: i64,
    duration_secs: i32,
}

async fn feed(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let query = ListQuery::parse(&req)?;

    let filter = FeedFilter {
        category: query.category.clone(),
    };

    let items = feed::page(
        &global.store,
        auth.id,
        &filter,
        query.page_request(10),
        Utc::now().date_naive(),
    )
    .await?;

    Ok(make_response!(
        StatusCode::OK,
        json!({ "items": items, "unlocked": true })
    ))
}

async fn mine(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let query = ListQuery::parse(&req)?;

    let items = content::list_mine(&global.store, auth.id, query.page_request(10)).await?;

    Ok(make_response!(StatusCode::OK, json!({ "items": items })))
}

async fn creator_stats(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;

    let stats =
        content::creator_stats(&global.store, auth.id, Utc::now().date_naive()).await?;

    Ok(make_response!(StatusCode::OK, json!(stats)))
}

async fn today(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;

    let state = gate::check(&global.store, auth.id, Utc::now().date_naive()).await?;

    Ok(make_response!(
        StatusCode::OK,
        json!({ "unlocked": state.is_unlocked(), "reason": state.reason() })
    ))
}

async fn record(mut req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;

    let body = hyper::body::to_bytes(req.body_mut())
        .await
        .map_err_route((StatusCode::BAD_REQUEST, "failed to read body"))?;
    let request: RecordRequest = serde_json::from_slice(&body)
        .map_err_route((StatusCode::BAD_REQUEST, "body is not valid json"))?;

    let item = content::record(
        &global.store,
        auth.id,
        NewContentItem {
            category: request.category,
            description: request.description,
            file_path: request.file_path,
            file_size: request.file_size,
            duration_secs: request.duration_secs,
        },
    )
    .await?;

    Ok(make_response!(
        StatusCode::CREATED,
        json!({ "success": true, "item": item })
    ))
}

async fn detail(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let id = param_i64(&req, "id")?;

    let item = content::detail(&global.store, auth.id, id).await?;

    Ok(make_response!(StatusCode::OK, json!({ "item": item })))
}

async fn remove(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global::<GlobalState>()?;
    let auth = auth_user(&req)?;
    let id = param_i64(&req, "id")?;

    content::remove(&global.store, auth.id, id).await?;

    Ok(make_response!(
        StatusCode::OK,
        json!({ "success": true, "message": "content deleted" })
    ))
}

pub fn routes(_global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    // Static paths are registered before the `/:id` catch-alls.
    Router::builder()
        .get("/feed", feed)
        .get("/mine", mine)
        .get("/streak", creator_stats)
        .get("/today", today)
        .post("/", record)
        .get("/:id", detail)
        .delete("/:id", remove)
        .build()
        .expect("failed to build router")
}
