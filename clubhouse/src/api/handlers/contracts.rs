use crate::api::models::contracts::{ContractCreate, ContractResponse, ContractUpdate, ListContractsQuery};
use crate::api::models::pagination::PaginatedResponse;
use crate::db::filter::Filter;
use crate::db::handlers::{Contracts, Repository, contracts};
use crate::errors::{Error, Result};
use crate::types::{ContractId, Resource};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/contracts",
    tag = "contracts",
    summary = "List contracts",
    params(ListContractsQuery),
    responses(
        (status = 200, description = "Paginated list of contracts", body = PaginatedResponse<ContractResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<ListContractsQuery>,
) -> Result<Json<PaginatedResponse<ContractResponse>>> {
    let mut conditions = Filter::new();
    if let Some(player_id) = query.player_id {
        conditions = conditions.eq("player_id", player_id.to_string());
    }
    if let Some(date) = query.active_on {
        conditions = contracts::active_on(conditions, date);
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (contracts, total) = Contracts::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        contracts.into_iter().map(ContractResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/contracts",
    tag = "contracts",
    summary = "Create contract",
    request_body = ContractCreate,
    responses(
        (status = 201, description = "Contract created successfully", body = ContractResponse),
        (status = 400, description = "Validation failed or unknown player"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_contract(
    State(state): State<AppState>,
    Json(create): Json<ContractCreate>,
) -> Result<(StatusCode, Json<ContractResponse>)> {
    let contract = Contracts::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(ContractResponse::from(contract))))
}

#[utoipa::path(
    get,
    path = "/contracts/{id}",
    tag = "contracts",
    summary = "Get contract",
    params(("id" = uuid::Uuid, Path, description = "Contract ID")),
    responses(
        (status = 200, description = "Contract details", body = ContractResponse),
        (status = 404, description = "Contract not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_contract(State(state): State<AppState>, Path(id): Path<ContractId>) -> Result<Json<ContractResponse>> {
    match Contracts::new(state.store.as_ref()).get_by_id(id).await? {
        Some(contract) => Ok(Json(ContractResponse::from(contract))),
        None => Err(Error::not_found(Resource::Contracts, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/contracts/{id}",
    tag = "contracts",
    summary = "Update contract",
    params(("id" = uuid::Uuid, Path, description = "Contract ID")),
    request_body = ContractUpdate,
    responses(
        (status = 200, description = "Contract updated successfully", body = ContractResponse),
        (status = 400, description = "Validation failed or unknown player"),
        (status = 404, description = "Contract not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<ContractId>,
    Json(update): Json<ContractUpdate>,
) -> Result<Json<ContractResponse>> {
    let contract = Contracts::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Contracts, id))?;
    Ok(Json(ContractResponse::from(contract)))
}

#[utoipa::path(
    delete,
    path = "/contracts/{id}",
    tag = "contracts",
    summary = "Delete contract",
    params(("id" = uuid::Uuid, Path, description = "Contract ID")),
    responses(
        (status = 204, description = "Contract deleted successfully"),
        (status = 404, description = "Contract not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_contract(State(state): State<AppState>, Path(id): Path<ContractId>) -> Result<StatusCode> {
    if Contracts::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Contracts, id))
    }
}
