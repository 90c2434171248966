// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! To-do endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::cash_flows::SearchQuery;
use super::json::ApiJson;
use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateTodoRequest, Todo, TodoListResponse, UpdateTodoRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/todos",
    params(SearchQuery),
    tag = "Todos",
    security(("bearer" = [])),
    responses(
        (status = 200, body = TodoListResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_todos(
    Auth(user): Auth,
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<TodoListResponse>, ApiError> {
    let todos = state.todos.list(&user.id, params.search.as_deref())?;
    let total = todos.len();
    Ok(Json(TodoListResponse { todos, total }))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTodoRequest,
    tag = "Todos",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Todo),
        (status = 400, description = "Missing title"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_todo(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.todos.create(&user.id, request)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    tag = "Todos",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Todo),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_todo(
    Auth(user): Auth,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos.get(&user.id, id)?))
}

#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    request_body = UpdateTodoRequest,
    tag = "Todos",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Todo),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_todo(
    Auth(user): Auth,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos.update(&user.id, id, request)?))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    tag = "Todos",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_todo(
    Auth(user): Auth,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.todos.delete(&user.id, id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{other_user, test_state};

    fn new_todo(title: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            title: Some(title.into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_todo_success() {
        let (state, user) = test_state();

        let (status, Json(todo)) =
            create_todo(Auth(user.clone()), State(state.clone()), ApiJson(new_todo("Learn axum")))
                .await
                .expect("todo creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(todo.owner, user.id);
        assert!(!todo.is_finished);
    }

    #[tokio::test]
    async fn create_todo_without_title_is_bad_request() {
        let (state, user) = test_state();

        let err = create_todo(Auth(user), State(state), ApiJson(CreateTodoRequest::default()))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_todos_is_owner_scoped() {
        let (state, user) = test_state();
        let other = other_user();
        state.todos.create(&user.id, new_todo("mine")).unwrap();
        state.todos.create(&other.id, new_todo("theirs")).unwrap();

        let Json(response) = list_todos(
            Auth(user.clone()),
            State(state),
            Query(SearchQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(response.todos[0].title, "mine");
    }

    #[tokio::test]
    async fn update_finishes_todo() {
        let (state, user) = test_state();
        let todo = state.todos.create(&user.id, new_todo("Learn axum")).unwrap();

        let Json(updated) = update_todo(
            Auth(user.clone()),
            Path(todo.id),
            State(state.clone()),
            ApiJson(UpdateTodoRequest {
                title: Some("Learn axum".into()),
                description: Some("done".into()),
                is_finished: Some(true),
            }),
        )
        .await
        .unwrap();

        assert!(updated.is_finished);
        let Json(fetched) = get_todo(Auth(user), Path(todo.id), State(state)).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn foreign_todo_is_not_found() {
        let (state, user) = test_state();
        let other = other_user();
        let todo = state.todos.create(&other.id, new_todo("theirs")).unwrap();

        let err = delete_todo(Auth(user), Path(todo.id), State(state.clone()))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(state.todos.get(&other.id, todo.id).is_ok());
    }
}
