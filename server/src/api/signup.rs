use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use entity::{company, employee};
use platform_api::{Envelope, ErrorList};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    http::{ApiError, ApiResult, AppState},
    store,
};

/// PF registration payload: an employee joining an existing company.
#[derive(Debug, Deserialize)]
pub struct IndividualSignup {
    pub name: String,
    pub email: String,
    pub password: String,
    /// CPF of the person being registered.
    pub tax_id: String,
    /// CNPJ of the company the person works for.
    pub company_tax_id: String,
    pub lunch_hours: Option<String>,
    pub workday_hours: Option<String>,
    pub hourly_rate: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IndividualSignupResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub company_tax_id: String,
    pub lunch_hours: Option<String>,
    pub workday_hours: Option<String>,
    pub hourly_rate: Option<String>,
}

/// PJ registration payload: a new company plus its first admin employee.
#[derive(Debug, Deserialize)]
pub struct CompanySignup {
    pub name: String,
    pub email: String,
    pub password: String,
    /// CPF of the admin being registered alongside the company.
    pub tax_id: String,
    pub company_name: String,
    pub company_tax_id: String,
}

#[derive(Debug, Serialize)]
pub struct CompanySignupResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub company_name: String,
    pub company_tax_id: String,
}

pub async fn register_individual(
    State(state): State<AppState>,
    Json(payload): Json<IndividualSignup>,
) -> ApiResult<(StatusCode, Json<Envelope<IndividualSignupResponse>>)> {
    info!(tax_id = %payload.tax_id, "registering individual");
    let mut errors = ErrorList::new();

    let company = store::companies::find_by_tax_id(&state.pool, &payload.company_tax_id).await?;
    if company.is_none() {
        errors.add(format!(
            "Company with tax id {} not found.",
            payload.company_tax_id
        ));
    }
    check_employee_conflicts(&state.pool, &payload.tax_id, &payload.email, &mut errors).await?;

    let lunch_hours = parse_hours("lunch_hours", payload.lunch_hours.as_deref(), &mut errors);
    let workday_hours = parse_hours(
        "workday_hours",
        payload.workday_hours.as_deref(),
        &mut errors,
    );
    let hourly_rate = parse_rate(payload.hourly_rate.as_deref(), &mut errors);

    // The company is always present once no error accumulated.
    let Some(company) = company.filter(|_| errors.is_empty()) else {
        warn!(errors = ?errors.messages(), "individual signup rejected");
        return Ok((StatusCode::BAD_REQUEST, Json(Envelope::rejected(errors))));
    };

    let now = Utc::now();
    let saved = employee::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        tax_id: Set(payload.tax_id),
        password_hash: Set(hash_password(&payload.password)?),
        role: Set(employee::Role::Ordinary),
        lunch_hours: Set(lunch_hours),
        workday_hours: Set(workday_hours),
        hourly_rate: Set(hourly_rate),
        company_id: Set(Some(company.id)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&state.pool)
    .await?;

    let response = IndividualSignupResponse {
        id: saved.id,
        name: saved.name,
        email: saved.email,
        tax_id: saved.tax_id,
        company_tax_id: company.tax_id,
        lunch_hours: saved.lunch_hours.map(|val| val.to_string()),
        workday_hours: saved.workday_hours.map(|val| val.to_string()),
        hourly_rate: saved.hourly_rate.map(|val| val.to_string()),
    };
    Ok((StatusCode::OK, Json(Envelope::ok(response))))
}

pub async fn register_company(
    State(state): State<AppState>,
    Json(payload): Json<CompanySignup>,
) -> ApiResult<(StatusCode, Json<Envelope<CompanySignupResponse>>)> {
    info!(company_tax_id = %payload.company_tax_id, "registering company");
    let mut errors = ErrorList::new();

    if store::companies::find_by_tax_id(&state.pool, &payload.company_tax_id)
        .await?
        .is_some()
    {
        errors.add(format!(
            "Company with tax id {} already exists.",
            payload.company_tax_id
        ));
    }
    check_employee_conflicts(&state.pool, &payload.tax_id, &payload.email, &mut errors).await?;

    if !errors.is_empty() {
        warn!(errors = ?errors.messages(), "company signup rejected");
        return Ok((StatusCode::BAD_REQUEST, Json(Envelope::rejected(errors))));
    }

    let password_hash = hash_password(&payload.password)?;
    let now = Utc::now();

    // Company and admin land together or not at all.
    let txn = state.pool.begin().await?;
    let saved_company = company::ActiveModel {
        name: Set(payload.company_name),
        tax_id: Set(payload.company_tax_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    let admin = employee::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        tax_id: Set(payload.tax_id),
        password_hash: Set(password_hash),
        role: Set(employee::Role::Admin),
        lunch_hours: Set(None),
        workday_hours: Set(None),
        hourly_rate: Set(None),
        company_id: Set(Some(saved_company.id)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    let response = CompanySignupResponse {
        id: admin.id,
        name: admin.name,
        email: admin.email,
        tax_id: admin.tax_id,
        company_name: saved_company.name,
        company_tax_id: saved_company.tax_id,
    };
    Ok((StatusCode::OK, Json(Envelope::ok(response))))
}

/// Employee-side uniqueness checks shared by both registration pipelines.
/// Both checks always run; errors accumulate instead of short-circuiting.
async fn check_employee_conflicts<C: ConnectionTrait>(
    db: &C,
    tax_id: &str,
    email: &str,
    errors: &mut ErrorList,
) -> Result<(), ApiError> {
    if store::employees::find_by_tax_id(db, tax_id).await?.is_some() {
        errors.add(format!("Employee with tax id {tax_id} already exists."));
    }
    if store::employees::find_by_email(db, email).await?.is_some() {
        errors.add(format!("Employee with email {email} already exists."));
    }
    Ok(())
}

/// Absent stays absent; malformed values accumulate a field error.
fn parse_hours(field: &str, value: Option<&str>, errors: &mut ErrorList) -> Option<f32> {
    let raw = value?;
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(format!("Invalid {field} value {raw:?}."));
            None
        }
    }
}

fn parse_rate(value: Option<&str>, errors: &mut ErrorList) -> Option<Decimal> {
    let raw = value?;
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(format!("Invalid hourly_rate value {raw:?}."));
            None
        }
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ApiError::PasswordHash(err.to_string()))
}
