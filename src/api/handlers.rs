use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::{
    db::UrlMapping,
    error::{ApiError, Result},
    state::AppState,
    types::ShortenResponse,
    utils::{build_short_url, generate_short_code, SHORT_CODE_LENGTH},
};

#[instrument]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    let response = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn create_short_url(State(state): State<AppState>, body: Bytes) -> Response {
    debug!(body = %String::from_utf8_lossy(&body), "Received create request");
    match create(&state, Some(&body[..])).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[instrument(skip(state))]
pub async fn redirect_short_url(
    State(state): State<AppState>,
    short_code: std::result::Result<Path<String>, PathRejection>,
) -> Response {
    let Path(short_code) = match short_code {
        Ok(path) => path,
        Err(rejection) => return ApiError::InvalidPath(rejection).into_response(),
    };
    redirect(&state, Some(&short_code))
        .await
        .unwrap_or_else(|e| e.into_response())
}

/// Bound to the redirect route when the gateway supplied no `code` parameter.
#[instrument(skip(state))]
pub async fn redirect_without_code(State(state): State<AppState>) -> Response {
    redirect(&state, None)
        .await
        .unwrap_or_else(|e| e.into_response())
}

/// Validates a `{"url": ...}` payload, stores it under a fresh short code
/// and describes the result. An empty body counts as absent.
///
/// The code is not checked against existing mappings: a colliding code
/// overwrites the earlier URL.
pub async fn create(state: &AppState, body: Option<&[u8]>) -> Result<ShortenResponse> {
    let body = body
        .filter(|body| !body.is_empty())
        .ok_or(ApiError::MissingBody)?;

    let payload: Value = serde_json::from_slice(body).map_err(ApiError::MalformedBody)?;
    debug!(body = %payload, "Parsed body");

    // url is stored verbatim, no scheme or syntax check
    let long_url = payload
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingField("url"))?;
    info!(long_url = %long_url, "Creating short URL");

    let mapping = UrlMapping {
        short_code: generate_short_code(SHORT_CODE_LENGTH),
        long_url: long_url.to_string(),
    };
    debug!(short_code = %mapping.short_code, "Generated short code");

    state
        .store
        .put(&mapping)
        .await
        .map_err(ApiError::StoreWrite)?;
    debug!(short_code = %mapping.short_code, "Stored mapping");

    let short_url = build_short_url(&state.base_url, &state.gateway, &mapping.short_code);
    info!(short_url = %short_url, "Created short URL");

    Ok(ShortenResponse {
        short_code: mapping.short_code,
        short_url,
        long_url: mapping.long_url,
    })
}

/// Resolves `code` to a 302 towards the stored URL. Reads never modify the
/// store, so repeated lookups answer identically.
pub async fn redirect(state: &AppState, code: Option<&str>) -> Result<Response> {
    let code = code
        .filter(|code| !code.is_empty())
        .ok_or(ApiError::MissingField("code"))?;
    info!(short_code = %code, "Looking up short code");

    let mapping = state.store.get(code).await.map_err(ApiError::StoreRead)?;
    debug!(short_code = %code, found = mapping.is_some(), "Store response");

    let Some(mapping) = mapping else {
        return Err(ApiError::NotFound);
    };
    info!(long_url = %mapping.long_url, "Found long URL");

    let location = HeaderValue::from_str(&mapping.long_url)
        .with_context(|| format!("stored URL for '{code}' is not a valid Location header"))?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain")),
        ],
        format!("Redirecting to {}", mapping.long_url),
    )
        .into_response())
}
