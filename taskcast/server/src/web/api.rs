use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::AppState;
use crate::{auth, task};

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::api::v1::register_handler,
        auth::api::v1::login_handler,
        task::api::v1::list_tasks_handler,
        task::api::v1::create_task_handler,
        task::api::v1::delete_task_handler,
        task::api::v1::task_stats_handler,
    ),
    components(schemas(
        model::Task,
        model::NewTask,
        model::Priority,
        model::PublicUser,
        model::NewUser,
        model::Credentials,
        model::TaskStats,
        model::PriorityBreakdown,
        model::ErrorResponse,
    )),
    tags(
        (name = "Users", description = "Registration and login"),
        (name = "Tasks", description = "Task records and statistics")
    )
)]
struct ApiDoc;

/// Creates the API routes for JSON API endpoints, plus the interactive
/// documentation they are described by.
pub fn create_api_router(state: AppState) -> Router {
    let users_router = auth::api::v1::create_api_router(state.clone());
    let tasks_router = task::api::v1::create_api_router(state);
    Router::new()
        .nest("/api", users_router.merge(tasks_router))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
