// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cash flow endpoints.
//!
//! Every handler takes the caller from the [`Auth`] extractor and hands its
//! id to the service; nothing here decides ownership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use super::json::ApiJson;
use crate::{
    auth::Auth,
    error::ApiError,
    models::{CashFlow, CashFlowListResponse, CashFlowRequest, LabelsResponse},
    state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive keyword. Blank means no filter.
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/cash-flows",
    params(SearchQuery),
    tag = "CashFlows",
    security(("bearer" = [])),
    responses(
        (status = 200, body = CashFlowListResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_cash_flows(
    Auth(user): Auth,
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<CashFlowListResponse>, ApiError> {
    let cash_flows = state.cash_flows.list(&user.id, params.search.as_deref())?;
    let total = cash_flows.len();
    Ok(Json(CashFlowListResponse { cash_flows, total }))
}

#[utoipa::path(
    post,
    path = "/api/cash-flows",
    request_body = CashFlowRequest,
    tag = "CashFlows",
    security(("bearer" = [])),
    responses(
        (status = 201, body = CashFlow),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_cash_flow(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CashFlowRequest>,
) -> Result<(StatusCode, Json<CashFlow>), ApiError> {
    let flow = state.cash_flows.create(&user.id, request)?;
    Ok((StatusCode::CREATED, Json(flow)))
}

#[utoipa::path(
    get,
    path = "/api/cash-flows/labels",
    tag = "CashFlows",
    security(("bearer" = [])),
    responses(
        (status = 200, body = LabelsResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_labels(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<LabelsResponse>, ApiError> {
    let labels = state.cash_flows.labels(&user.id)?;
    Ok(Json(LabelsResponse { labels }))
}

#[utoipa::path(
    get,
    path = "/api/cash-flows/{id}",
    params(("id" = Uuid, Path, description = "Cash flow identifier")),
    tag = "CashFlows",
    security(("bearer" = [])),
    responses(
        (status = 200, body = CashFlow),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_cash_flow(
    Auth(user): Auth,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<CashFlow>, ApiError> {
    Ok(Json(state.cash_flows.get(&user.id, id)?))
}

#[utoipa::path(
    put,
    path = "/api/cash-flows/{id}",
    params(("id" = Uuid, Path, description = "Cash flow identifier")),
    request_body = CashFlowRequest,
    tag = "CashFlows",
    security(("bearer" = [])),
    responses(
        (status = 200, body = CashFlow),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_cash_flow(
    Auth(user): Auth,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CashFlowRequest>,
) -> Result<Json<CashFlow>, ApiError> {
    Ok(Json(state.cash_flows.update(&user.id, id, request)?))
}

#[utoipa::path(
    delete,
    path = "/api/cash-flows/{id}",
    params(("id" = Uuid, Path, description = "Cash flow identifier")),
    tag = "CashFlows",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_cash_flow(
    Auth(user): Auth,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.cash_flows.delete(&user.id, id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{other_user, test_state};
    use crate::models::CashFlowType;

    fn salary() -> CashFlowRequest {
        CashFlowRequest {
            flow_type: Some("income".into()),
            source: Some("Bank".into()),
            label: Some("salary".into()),
            amount: Some(5_000),
            description: Some("October pay".into()),
        }
    }

    #[tokio::test]
    async fn create_cash_flow_success() {
        let (state, user) = test_state();

        let (status, Json(flow)) =
            create_cash_flow(Auth(user.clone()), State(state.clone()), ApiJson(salary()))
                .await
                .expect("cash flow creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(flow.owner, user.id);
        assert_eq!(flow.flow_type, CashFlowType::Income);
        assert_eq!(state.cash_flows.get(&user.id, flow.id).unwrap(), flow);
    }

    #[tokio::test]
    async fn create_cash_flow_rejects_non_positive_amount() {
        let (state, user) = test_state();
        let request = CashFlowRequest {
            amount: Some(-1),
            ..salary()
        };

        let err = create_cash_flow(Auth(user.clone()), State(state.clone()), ApiJson(request))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(state.cash_flows.list(&user.id, None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_returns_only_callers_records() {
        let (state, user) = test_state();
        let other = other_user();
        state.cash_flows.create(&user.id, salary()).unwrap();
        state.cash_flows.create(&other.id, salary()).unwrap();

        let Json(response) = list_cash_flows(
            Auth(user.clone()),
            State(state.clone()),
            Query(SearchQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(response.cash_flows[0].owner, user.id);
    }

    #[tokio::test]
    async fn search_query_narrows_listing() {
        let (state, user) = test_state();
        state.cash_flows.create(&user.id, salary()).unwrap();
        state
            .cash_flows
            .create(
                &user.id,
                CashFlowRequest {
                    flow_type: Some("expense".into()),
                    label: Some("rent".into()),
                    description: Some("Flat".into()),
                    ..salary()
                },
            )
            .unwrap();

        let Json(response) = list_cash_flows(
            Auth(user),
            State(state),
            Query(SearchQuery {
                search: Some("RENT".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(response.cash_flows[0].label, "rent");
    }

    #[tokio::test]
    async fn labels_endpoint_lists_distinct_labels() {
        let (state, user) = test_state();
        state.cash_flows.create(&user.id, salary()).unwrap();
        state.cash_flows.create(&user.id, salary()).unwrap();

        let Json(response) = list_labels(Auth(user), State(state)).await.unwrap();
        assert_eq!(response.labels, vec!["salary"]);
    }

    #[tokio::test]
    async fn foreign_record_is_not_found_for_every_verb() {
        let (state, user) = test_state();
        let other = other_user();
        let flow = state.cash_flows.create(&other.id, salary()).unwrap();

        let get = get_cash_flow(Auth(user.clone()), Path(flow.id), State(state.clone()))
            .await
            .unwrap_err();
        let put = update_cash_flow(
            Auth(user.clone()),
            Path(flow.id),
            State(state.clone()),
            ApiJson(salary()),
        )
        .await
        .unwrap_err();
        let delete = delete_cash_flow(Auth(user.clone()), Path(flow.id), State(state.clone()))
            .await
            .unwrap_err();

        for err in [get, put, delete] {
            assert_eq!(err.status, StatusCode::NOT_FOUND);
        }
        assert_eq!(state.cash_flows.get(&other.id, flow.id).unwrap(), flow);
    }

    #[tokio::test]
    async fn update_then_delete_own_record() {
        let (state, user) = test_state();
        let flow = state.cash_flows.create(&user.id, salary()).unwrap();

        let Json(updated) = update_cash_flow(
            Auth(user.clone()),
            Path(flow.id),
            State(state.clone()),
            ApiJson(CashFlowRequest {
                amount: Some(5_500),
                ..salary()
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.amount, 5_500);

        let status = delete_cash_flow(Auth(user.clone()), Path(flow.id), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.cash_flows.get(&user.id, flow.id).is_err());
    }
}
