use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use entity::company;
use platform_api::Envelope;
use serde::Serialize;
use tracing::info;

use crate::{
    http::{ApiResult, AppState},
    store,
};

#[derive(Debug, Serialize)]
pub struct CompanyDto {
    pub id: i64,
    pub name: String,
    pub tax_id: String,
}

impl From<company::Model> for CompanyDto {
    fn from(model: company::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            tax_id: model.tax_id,
        }
    }
}

pub async fn find_by_tax_id(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> ApiResult<(StatusCode, Json<Envelope<CompanyDto>>)> {
    info!(%tax_id, "looking up company by tax id");
    match store::companies::find_by_tax_id(&state.pool, &tax_id).await? {
        Some(company) => Ok((StatusCode::OK, Json(Envelope::ok(company.into())))),
        None => {
            info!(%tax_id, "company not found");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(Envelope::error(format!(
                    "Company with tax id {tax_id} not found."
                ))),
            ))
        }
    }
}
