//! HTTP request handlers
//!
//! The keyword and filter state are round-tripped through query and form
//! parameters on every request; nothing is held in server-side session
//! state.

use super::state::AppState;
use crate::model::Artwork;
use crate::store::{ArtworkFilter, OrderBy};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::error;

/// Form body for a new search
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub keyword: String,
}

/// Query parameters for the results listing
#[derive(Debug, Deserialize)]
pub struct ResultsParams {
    /// The search keyword the store was built for
    pub q: Option<String>,
    /// Page number (1-indexed)
    pub page: Option<u32>,
    /// Selected mediums (comma-separated)
    pub mediums: Option<String>,
    /// Lower date bound
    pub from: Option<String>,
    /// Upper date bound
    pub to: Option<String>,
    /// Output format
    pub format: Option<String>,
}

/// Results response for JSON format
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub query: String,
    pub total_results: u64,
    pub page: u32,
    pub per_page: u32,
    pub mediums: Vec<String>,
    pub works: Vec<Artwork>,
}

/// Home page: discard the previous search and start over
pub async fn index(State(state): State<AppState>) -> Response {
    if let Err(e) = state.store.rebuild() {
        error!("Store rebuild failed: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
    }
    Redirect::to("/search").into_response()
}

/// Search form page
pub async fn search_form(State(state): State<AppState>) -> Response {
    if let Err(e) = state.store.rebuild() {
        error!("Store rebuild failed: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
    }

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());

    match state.templates.render_with_context("search.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Run an aggregation for the submitted keyword
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Response {
    let keyword = form.keyword.trim().to_string();
    if keyword.is_empty() {
        return Redirect::to("/search").into_response();
    }

    match state.aggregator.run(&keyword).await {
        Ok(_) => {
            Redirect::to(&format!("/results?q={}", urlencoding::encode(&keyword))).into_response()
        }
        Err(e) => {
            error!("Aggregation for '{}' failed: {}", keyword, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response()
        }
    }
}

/// Parse the comma-separated mediums parameter into a filter
fn build_filter(params: &ResultsParams) -> ArtworkFilter {
    let mediums = params
        .mediums
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();

    ArtworkFilter {
        mediums,
        date_from: params.from.clone().filter(|d| !d.is_empty()),
        date_to: params.to.clone().filter(|d| !d.is_empty()),
    }
}

/// Rebuild the canonical query string for pagination links
fn filter_query_string(query: &str, filter: &ArtworkFilter) -> String {
    let mut qs = format!("q={}", urlencoding::encode(query));
    if !filter.mediums.is_empty() {
        qs.push_str(&format!(
            "&mediums={}",
            urlencoding::encode(&filter.mediums.join(","))
        ));
    }
    if let Some(ref from) = filter.date_from {
        qs.push_str(&format!("&from={}", urlencoding::encode(from)));
    }
    if let Some(ref to) = filter.date_to {
        qs.push_str(&format!("&to={}", urlencoding::encode(to)));
    }
    qs
}

/// Paginated, filterable results listing
pub async fn results(
    State(state): State<AppState>,
    Query(params): Query<ResultsParams>,
) -> Response {
    let query = params.q.clone().unwrap_or_default();
    let page = params.page.unwrap_or(1).max(1);
    let per_page = state.per_page();
    let filter = build_filter(&params);

    // The unfiltered listing is alphabetical; the filtered one keeps the
    // id order of the original
    let order = if filter.is_empty() {
        OrderBy::TitleArtist
    } else {
        OrderBy::ExternalId
    };

    let listing = state
        .store
        .count(&filter)
        .and_then(|total| {
            let works = state.store.page(&filter, order, page, per_page)?;
            let facet = state.store.mediums()?;
            Ok((total, works, facet))
        });

    let (total, works, facet) = match listing {
        Ok(listing) => listing,
        Err(e) => {
            error!("Results query failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
        }
    };

    if params.format.as_deref() == Some("json") {
        let response = ResultsResponse {
            query,
            total_results: total,
            page,
            per_page,
            mediums: facet,
            works,
        };
        return Json(response).into_response();
    }

    let header = if total == 0 {
        format!("No results for '{}'", query)
    } else {
        format!("Search results for '{}'", query)
    };
    let pages = (total + per_page as u64 - 1) / per_page as u64;

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("header", &header);
    ctx.insert("query", &query);
    ctx.insert("works", &works);
    ctx.insert("mediums", &facet);
    ctx.insert("selected_mediums", &filter.mediums);
    ctx.insert("from_date", &filter.date_from.clone().unwrap_or_default());
    ctx.insert("to_date", &filter.date_to.clone().unwrap_or_default());
    ctx.insert("total_results", &total);
    ctx.insert("page", &page);
    ctx.insert("pages", &pages);
    ctx.insert("filter_qs", &filter_query_string(&query, &filter));

    match state.templates.render_with_context("results.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Filter form submission: redirect to the results listing with the
/// filter state as explicit query parameters.
///
/// The body is parsed by hand because the medium checkboxes repeat the
/// same field name.
pub async fn apply_filter(State(_state): State<AppState>, body: String) -> Response {
    let mut query = String::new();
    let mut mediums: Vec<String> = Vec::new();
    let mut from = String::new();
    let mut to = String::new();

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "q" => query = value.into_owned(),
            "mediums" => mediums.push(value.into_owned()),
            "from" => from = value.into_owned(),
            "to" => to = value.into_owned(),
            _ => {}
        }
    }

    let filter = ArtworkFilter {
        mediums,
        date_from: Some(from).filter(|d| !d.is_empty()),
        date_to: Some(to).filter(|d| !d.is_empty()),
    };

    Redirect::to(&format!("/results?{}", filter_query_string(&query, &filter))).into_response()
}

/// Museum collections page
pub async fn museums(State(state): State<AppState>) -> impl IntoResponse {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("museum_list", &state.registry.listing());

    match state.templates.render_with_context("museums.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// About page handler
pub async fn about(State(state): State<AppState>) -> impl IntoResponse {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("version", crate::VERSION);

    match state.templates.render_with_context("about.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            Html(format!("<h1>About</h1><p>{}</p>", state.instance_name())).into_response()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mediums: Option<&str>, from: Option<&str>, to: Option<&str>) -> ResultsParams {
        ResultsParams {
            q: Some("vase".to_string()),
            page: None,
            mediums: mediums.map(str::to_string),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            format: None,
        }
    }

    #[test]
    fn test_build_filter_splits_mediums() {
        let filter = build_filter(&params(Some("Print, Painting,"), None, None));
        assert_eq!(filter.mediums, vec!["Print", "Painting"]);
        assert!(filter.date_from.is_none());
    }

    #[test]
    fn test_build_filter_empty_bounds_omitted() {
        let filter = build_filter(&params(None, Some(""), Some("2000")));
        assert!(filter.date_from.is_none());
        assert_eq!(filter.date_to.as_deref(), Some("2000"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_filter_query_string_round_trip() {
        let filter = build_filter(&params(Some("Print,Painting"), Some("1990"), None));
        let qs = filter_query_string("delft vase", &filter);
        assert_eq!(qs, "q=delft%20vase&mediums=Print%2CPainting&from=1990");
    }
}
