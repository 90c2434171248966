// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON body extractor whose rejections render as [`ApiError`].
//!
//! `axum::Json` answers a body it cannot read with a plain-text 422. Request
//! bodies here are all-optional DTOs, so anything serde rejects is a wrong
//! type or broken syntax, and the client gets the same 400 `ErrorBody` as
//! for a failed field check.

use axum::{extract::rejection::JsonRejection, extract::FromRequest, Json};

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        ApiError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        amount: Option<i64>,
    }

    async fn extract(
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<ApiJson<Payload>, ApiError> {
        let mut builder = Request::post("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();
        ApiJson::<Payload>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let ApiJson(body) = extract(Some("application/json"), r#"{"amount":5}"#)
            .await
            .unwrap();
        assert_eq!(body.amount, Some(5));
    }

    #[tokio::test]
    async fn wrong_field_type_is_bad_request() {
        for body in [r#"{"amount":"abc"}"#, r#"{"amount":10.5}"#] {
            let err = extract(Some("application/json"), body).await.unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert!(err.message.contains("amount"), "{}", err.message);
        }
    }

    #[tokio::test]
    async fn syntax_error_and_missing_content_type_are_bad_request() {
        let broken = extract(Some("application/json"), "{").await.unwrap_err();
        assert_eq!(broken.status, StatusCode::BAD_REQUEST);

        let untyped = extract(None, r#"{"amount":5}"#).await.unwrap_err();
        assert_eq!(untyped.status, StatusCode::BAD_REQUEST);
    }
}
