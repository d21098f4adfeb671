//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications, and Swagger UI is
//! served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/corporations/{corporation_id}/directors` - List all directors
/// - `POST /api/corporations/{corporation_id}/directors` - Register a director
/// - `GET /api/corporations/{corporation_id}/directors/healthy` - List healthy directors
/// - `POST /api/corporations/{corporation_id}/directors/verify` - Verify all directors
/// - `DELETE /api/corporations/{corporation_id}/directors/{character_id}` - Remove a director
/// - `PUT /api/corporations/{corporation_id}/directors/{character_id}/priority` - Change priority
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Warden", description = "Warden director management API"),
        tags((name = controller::director::DIRECTOR_TAG, description = "Corporation directors")),
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::director::list_directors,
            controller::director::add_director
        ))
        .routes(routes!(controller::director::list_healthy_directors))
        .routes(routes!(controller::director::verify_directors))
        .routes(routes!(controller::director::remove_director))
        .routes(routes!(controller::director::update_priority))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
