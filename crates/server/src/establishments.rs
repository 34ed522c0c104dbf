//! Establishment API endpoints.

use api_types::establishment::{EstablishmentBody, EstablishmentView};
use api_types::response::ResponseDetails;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Establishment, EstablishmentCmd};

use crate::{ServerError, fill, parse_id, server::ServerState};

fn view(establishment: Establishment) -> EstablishmentView {
    EstablishmentView {
        id: establishment
            .id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        name: establishment.name,
        kind: establishment.kind,
        created_at: establishment.created_at,
        updated_at: establishment.updated_at,
    }
}

fn cmd(body: EstablishmentBody) -> EstablishmentCmd {
    EstablishmentCmd {
        name: body.name,
        kind: body.kind,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<EstablishmentView>>, ServerError> {
    tracing::info!("listing establishments");
    let establishments = state
        .engine
        .establishments()
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    if establishments.is_empty() {
        return Err(ServerError::new(
            StatusCode::NOT_FOUND,
            fill(&state.messages.not_found, "Estabelecimento"),
        ));
    }

    Ok(Json(establishments.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<EstablishmentBody>,
) -> Result<(StatusCode, Json<EstablishmentView>), ServerError> {
    tracing::info!("creating establishment \"{}\"", body.name);
    let created = state
        .engine
        .create_establishment(cmd(body))
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    Ok((StatusCode::CREATED, Json(view(created))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<EstablishmentBody>,
) -> Result<Json<EstablishmentView>, ServerError> {
    let id = parse_id(&state.messages, &id)?;
    tracing::info!("updating establishment {id}");
    let updated = state
        .engine
        .update_establishment(&id, cmd(body))
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    Ok(Json(view(updated)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ResponseDetails>, ServerError> {
    let id = parse_id(&state.messages, &id)?;
    tracing::info!("removing establishment {id}");
    state
        .engine
        .remove_establishment(&id)
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    Ok(Json(ResponseDetails {
        status_code: 200,
        message: fill(&state.messages.deleted_success, "Estabelecimento"),
    }))
}
