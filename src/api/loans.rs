//! Loan API endpoints.
//!
//! - GET `/` - List all loans
//! - POST `/` - Create a loan request
//! - GET `/{id}` - Get a loan by its object identifier

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use super::error::{ApiError, ResultExt, validate_object_id};
use crate::db::Database;

#[derive(Clone)]
pub struct LoansState {
    pub db: Database,
}

pub fn router(state: LoansState) -> Router {
    Router::new()
        .route("/", get(list_loans).post(create_loan))
        .route("/{id}", get(get_loan))
        .with_state(state)
}

#[derive(Deserialize)]
struct CreateLoanRequest {
    email: Option<String>,
    amount: Option<f64>,
    purpose: Option<String>,
}

async fn create_loan(
    State(state): State<LoansState>,
    Json(payload): Json<CreateLoanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    let amount = payload
        .amount
        .ok_or_else(|| ApiError::bad_request("Amount is required"))?;

    let uuid = uuid::Uuid::new_v4().to_string();

    state
        .db
        .loans()
        .create(&uuid, email, amount, payload.purpose.as_deref())
        .await
        .db_err("Failed to create loan")?;

    let loan = state
        .db
        .loans()
        .get_by_uuid(&uuid)
        .await
        .db_err("Failed to get loan")?
        .ok_or_else(|| ApiError::internal("Loan not found after creation"))?;

    Ok((StatusCode::CREATED, Json(loan)))
}

async fn list_loans(State(state): State<LoansState>) -> Result<impl IntoResponse, ApiError> {
    let loans = state.db.loans().list().await.db_err("Failed to list loans")?;

    Ok(Json(loans))
}

/// Get a loan by identifier. A syntactically invalid identifier is rejected
/// before any lookup.
async fn get_loan(
    State(state): State<LoansState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_object_id(&id)?;

    let loan = state
        .db
        .loans()
        .get_by_uuid(&id)
        .await
        .db_err("Failed to get loan")?
        .ok_or_else(|| ApiError::not_found("Loan not found"))?;

    Ok(Json(loan))
}
