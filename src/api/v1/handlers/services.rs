/*
 * Responsibility
 * - GET /services, GET /services/{id} (public catalog)
 * - {id} is a public id; the extractor decodes it to the internal id
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::services::{ListServicesQuery, ServiceResponse, ServiceSummary},
        extractors::{ValidatedQuery, public_id::PublicServiceId},
    },
    error::AppError,
    repos::service_repo::{self, PriceOrder},
    state::AppState,
};

pub async fn list_services(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListServicesQuery>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let order = PriceOrder::from_query(query.sort.as_deref());
    let rows = service_repo::list(&state.db, order).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(ServiceResponse {
            id: state.id_codec.encode(row.service_id)?,
            title: row.title,
            price: row.price,
            img: row.img,
            description: row.description,
        });
    }

    Ok(Json(res))
}

pub async fn get_service(
    State(state): State<AppState>,
    service_id: PublicServiceId,
) -> Result<Json<ServiceSummary>, AppError> {
    let row = service_repo::get(&state.db, service_id.id)
        .await?
        .ok_or(AppError::not_found("service"))?;

    Ok(Json(ServiceSummary {
        id: state.id_codec.encode(row.service_id)?,
        title: row.title,
        price: row.price,
        img: row.img,
    }))
}
