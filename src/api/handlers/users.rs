//! User handlers: registration, profile, owned tickets, wallet connect.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ConnectWalletRequest, RegisterUserRequest};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::domain::{TicketWithEvent, User, UserId};
use crate::error::{ErrorResponse, NexusError};
use crate::service::WalletConnection;

/// `POST /users`: Register a user.
///
/// # Errors
///
/// Returns [`NexusError::UsernameTaken`], [`NexusError::WalletTaken`] or
/// [`NexusError::InvalidRequest`].
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    summary = "Register a user",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 409, description = "Username or wallet already taken", body = ErrorResponse),
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterUserRequest>,
) -> Result<impl IntoResponse, NexusError> {
    let user = state
        .wallet
        .register(&req.username, &req.password, req.wallet_address.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`: Get a user profile.
///
/// # Errors
///
/// Returns [`NexusError::UserNotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Get user profile",
    params(
        ("id" = u64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<User>, NexusError> {
    Ok(Json(state.wallet.get_user(id).await?))
}

/// `GET /users/{id}/tickets`: Tickets owned by a user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/tickets",
    tag = "Users",
    summary = "List a user's tickets",
    description = "Returns every ticket the user owns, joined with its event.",
    params(
        ("id" = u64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "Owned tickets", body = Vec<TicketWithEvent>),
    )
)]
pub async fn user_tickets(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Json<Vec<TicketWithEvent>> {
    Json(state.ticketing.tickets_for_user(id).await)
}

/// `POST /wallet/connect`: Sign in with a wallet address.
///
/// # Errors
///
/// Returns [`NexusError::InvalidRequest`] for a malformed address.
#[utoipa::path(
    post,
    path = "/api/v1/wallet/connect",
    tag = "Users",
    summary = "Connect a wallet",
    description = "Returns the user linked to the wallet, creating one on first contact. Responds 201 when a user was created.",
    request_body = ConnectWalletRequest,
    responses(
        (status = 200, description = "Existing user", body = WalletConnection),
        (status = 201, description = "User created", body = WalletConnection),
        (status = 400, description = "Malformed wallet address", body = ErrorResponse),
    )
)]
pub async fn connect_wallet(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ConnectWalletRequest>,
) -> Result<impl IntoResponse, NexusError> {
    let connection = state.wallet.connect(&req.wallet_address).await?;
    let status = if connection.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(connection)))
}

/// User and wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/tickets", get(user_tickets))
        .route("/wallet/connect", post(connect_wallet))
}
