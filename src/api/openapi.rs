//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, profile, publications, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scholar Homepage API",
        version = "1.0.0",
        description = "Publications, students and profile API of an academic homepage",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        // Publications
        publications::proxy,
        publications::browse,
        publications::by_year,
        publications::citation,
        // Students
        students::list_students,
        // Profile
        profile::get_profile,
    ),
    components(
        schemas(
            // Publications
            crate::models::publication::DocType,
            crate::models::publication::PublicationRecord,
            crate::browser::PublicationPage,
            crate::browser::PublicationRow,
            crate::browser::AuthorBadge,
            crate::browser::TypeCounts,
            crate::browser::YearGroup,
            crate::citation::Citation,
            publications::PublicationQuery,
            // Students
            crate::models::student::Student,
            crate::models::student::StudentKind,
            crate::models::student::StudentQuery,
            // Profile
            crate::models::profile::Profile,
            crate::models::profile::ProfileLink,
            crate::models::profile::TimelineEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "publications", description = "Publications from the HAL open archive"),
        (name = "students", description = "Supervised students"),
        (name = "profile", description = "Homepage profile")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_publication_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/publications.json"));
        assert!(doc.paths.paths.contains_key("/api/citations/{index}"));
    }
}
