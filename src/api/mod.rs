// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{http::HeaderName, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::IssuedToken,
    error::ErrorBody,
    models::{
        CashFlow, CashFlowListResponse, CashFlowRequest, CashFlowType, CreateTodoRequest,
        LabelsResponse, Todo, TodoListResponse, UpdateTodoRequest,
    },
    state::AppState,
    storage::UserProfile,
};

pub mod cash_flows;
pub mod health;
pub mod json;
pub mod todos;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users/me", get(users::get_current_user))
        .route(
            "/cash-flows",
            get(cash_flows::list_cash_flows).post(cash_flows::create_cash_flow),
        )
        .route("/cash-flows/labels", get(cash_flows::list_labels))
        .route(
            "/cash-flows/{id}",
            get(cash_flows::get_cash_flow)
                .put(cash_flows::update_cash_flow)
                .delete(cash_flows::delete_cash_flow),
        )
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        );

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Registers the bearer token scheme referenced by `security(("bearer" = []))`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token issued for a registered user"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cashbook API",
        description = "Per-user cash flow and to-do tracking."
    ),
    paths(
        health::index,
        health::health,
        health::liveness,
        health::readiness,
        users::get_current_user,
        cash_flows::list_cash_flows,
        cash_flows::create_cash_flow,
        cash_flows::list_labels,
        cash_flows::get_cash_flow,
        cash_flows::update_cash_flow,
        cash_flows::delete_cash_flow,
        todos::list_todos,
        todos::create_todo,
        todos::get_todo,
        todos::update_todo,
        todos::delete_todo
    ),
    components(
        schemas(
            CashFlow,
            CashFlowType,
            CashFlowRequest,
            CashFlowListResponse,
            LabelsResponse,
            Todo,
            CreateTodoRequest,
            UpdateTodoRequest,
            TodoListResponse,
            UserProfile,
            IssuedToken,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Banner and probes"),
        (name = "Users", description = "Current user"),
        (name = "CashFlows", description = "Income and expense records"),
        (name = "Todos", description = "To-do items")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::Duration;
    use tempfile::TempDir;

    use crate::auth::{SigningSecret, TokenCodec, TokenConfig, UserId};
    use crate::state::AppState;
    use crate::storage::{MemoryUserDirectory, UserProfile};

    fn codec() -> Arc<TokenCodec> {
        let config = TokenConfig::new(
            SigningSecret::new("api-test-secret-0123456789abcdef").unwrap(),
            Duration::hours(1),
        )
        .unwrap();
        Arc::new(TokenCodec::new(&config))
    }

    fn directory_with_user() -> (Arc<MemoryUserDirectory>, UserProfile) {
        let users = MemoryUserDirectory::new();
        let user = UserProfile::new(UserId::new_random(), "Ayu", "ayu@example.com");
        users.insert(user.clone()).unwrap();
        (Arc::new(users), user)
    }

    /// In-memory state with one registered user.
    pub fn test_state() -> (AppState, UserProfile) {
        let (users, user) = directory_with_user();
        (AppState::in_memory(codec(), users), user)
    }

    /// File-backed state with one registered user.
    pub fn file_state() -> (AppState, UserProfile, TempDir) {
        let dir = TempDir::new().unwrap();
        let (users, user) = directory_with_user();
        let state = AppState::with_file_storage(codec(), users, dir.path()).unwrap();
        (state, user, dir)
    }

    /// A second identity. Services never consult the directory.
    pub fn other_user() -> UserProfile {
        UserProfile::new(UserId::new_random(), "Budi", "budi@example.com")
    }
}
