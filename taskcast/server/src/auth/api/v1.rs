use axum::{Router, extract::State, http::StatusCode, response::Json, routing::post};
use model::{Credentials, ErrorResponse, NewUser, PublicUser};

use crate::auth::{AuthServiceError, UserService};
use crate::web::AppState;

/// Handler for POST /api/users/register - registers a user.
/// The response never carries the password.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = NewUser,
    responses(
        (status = 201, description = "User registered", body = PublicUser),
        (status = 400, description = "Invalid payload or duplicate username/email", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, Json<ErrorResponse>)> {
    let service = UserService::new(&state.storage);
    match service.register(payload).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(PublicUser::from(user)))),
        Err(err) => {
            tracing::warn!("Rejected registration: {}", err);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(err.to_string())),
            ))
        }
    }
}

/// Handler for POST /api/users/login - checks credentials and returns the
/// user identity.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials accepted", body = PublicUser),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<PublicUser>, (StatusCode, Json<ErrorResponse>)> {
    let service = UserService::new(&state.storage);
    match service.login(payload).await {
        Ok(user) => Ok(Json(PublicUser::from(user))),
        Err(err @ AuthServiceError::MissingCredentials) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(err.to_string())),
        )),
        Err(err @ AuthServiceError::InvalidCredentials) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(err.to_string())),
        )),
        Err(err) => {
            tracing::error!("Login failed: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Login failed")),
            ))
        }
    }
}

/// Creates the users API router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/users/register", post(register_handler))
        .route("/users/login", post(login_handler))
        .with_state(state)
}
