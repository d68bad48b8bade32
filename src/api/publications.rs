//! Publication endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    browser::{BrowseOptions, PublicationBrowser, PublicationColumn, PublicationPage, YearGroup},
    citation::Citation,
    error::{AppError, AppResult, ErrorResponse},
    models::publication::DocType,
    table::{SortDirection, SortKey},
    AppState,
};

/// Publications table query parameters
#[derive(Debug, Default, Deserialize, Validate, IntoParams, ToSchema)]
pub struct PublicationQuery {
    /// Sort column: `year`, `title` or `conference_or_journal`
    pub sort: Option<String>,
    /// `asc` (default) or `desc`
    pub order: Option<String>,
    /// Substring of the title
    pub title: Option<String>,
    /// Substring of the space-joined author names
    pub authors: Option<String>,
    /// Exact type label: `Journal`, `Conference` or `Other`
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    /// Page number (default: 1)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<usize>,
    /// Rows per page (default: configured page size)
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<usize>,
}

impl PublicationQuery {
    pub fn to_options(&self, default_page_size: usize) -> AppResult<BrowseOptions> {
        let sort = match self.sort.as_deref().filter(|s| !s.is_empty()) {
            Some(id) => {
                let column = PublicationColumn::from_sort_id(id).ok_or_else(|| {
                    AppError::BadRequest(format!("Unknown sort column '{}'", id))
                })?;
                let direction = match self.order.as_deref() {
                    None | Some("") => SortDirection::Ascending,
                    Some(order) => SortDirection::from_param(order).ok_or_else(|| {
                        AppError::BadRequest(format!("Unknown sort order '{}'", order))
                    })?,
                };
                Some(SortKey { column, direction })
            }
            None => None,
        };

        let doc_type = match self.doc_type.as_deref().filter(|t| !t.is_empty()) {
            Some(label) => Some(DocType::from_label(label).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown publication type '{}'", label))
            })?),
            None => None,
        };

        Ok(BrowseOptions {
            sort,
            title: self.title.clone(),
            authors: self.authors.clone(),
            doc_type,
            page_index: self.page.unwrap_or(1).saturating_sub(1),
            page_size: self.per_page.unwrap_or(default_page_size),
        })
    }
}

/// One browser instance per request: a single upstream load
async fn load_browser(state: &AppState) -> PublicationBrowser {
    let mut browser = PublicationBrowser::new(state.config.profile.name.clone());
    browser.load(&state.services.publications).await;
    browser
}

/// Raw search payload from HAL, relayed verbatim with a shared-cache policy
#[utoipa::path(
    get,
    path = "/api/publications.json",
    tag = "publications",
    responses(
        (status = 200, description = "Upstream search payload", content_type = "application/json"),
        (status = 500, description = "Upstream unavailable", body = ErrorResponse)
    )
)]
pub async fn proxy(State(state): State<AppState>) -> AppResult<Response> {
    let payload = state.services.publications.fetch_raw().await?;

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, state.config.cache.header_value())],
        Json(payload),
    )
        .into_response())
}

/// Sorted, filtered and paginated publications
#[utoipa::path(
    get,
    path = "/api/publications",
    tag = "publications",
    params(PublicationQuery),
    responses(
        (status = 200, description = "Page of publications", body = PublicationPage),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Upstream unavailable", body = ErrorResponse)
    )
)]
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<PublicationQuery>,
) -> AppResult<Json<PublicationPage>> {
    query.validate()?;
    let options = query.to_options(state.config.browser.page_size)?;

    let browser = load_browser(&state).await;
    Ok(Json(browser.browse(&options)?))
}

/// Publications grouped by year, most recent first
#[utoipa::path(
    get,
    path = "/api/publications/by-year",
    tag = "publications",
    responses(
        (status = 200, description = "Publications by year", body = Vec<YearGroup>),
        (status = 500, description = "Upstream unavailable", body = ErrorResponse)
    )
)]
pub async fn by_year(State(state): State<AppState>) -> AppResult<Json<Vec<YearGroup>>> {
    let browser = load_browser(&state).await;
    Ok(Json(browser.by_year()?))
}

/// Citation and BibTeX of the publication at `index` in upstream order
#[utoipa::path(
    get,
    path = "/api/citations/{index}",
    tag = "publications",
    params(
        ("index" = usize, Path, description = "Position of the publication in the upstream order")
    ),
    responses(
        (status = 200, description = "Citation", body = Citation),
        (status = 404, description = "No publication at this index", body = ErrorResponse),
        (status = 500, description = "Upstream unavailable", body = ErrorResponse)
    )
)]
pub async fn citation(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<Citation>> {
    let browser = load_browser(&state).await;
    Ok(Json(browser.citation(index)?))
}
