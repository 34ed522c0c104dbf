//! Release API endpoints.

use api_types::release::{PaymentMethod as ApiMethod, ReleaseBody, ReleaseView};
use api_types::response::ResponseDetails;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Release, ReleaseCmd};

use crate::{ServerError, fill, parse_id, server::ServerState};

pub(crate) fn api_method(method: engine::PaymentMethod) -> ApiMethod {
    match method {
        engine::PaymentMethod::Cash => ApiMethod::Cash,
        engine::PaymentMethod::Credit => ApiMethod::Credit,
        engine::PaymentMethod::Debit => ApiMethod::Debit,
    }
}

fn engine_method(method: ApiMethod) -> engine::PaymentMethod {
    match method {
        ApiMethod::Cash => engine::PaymentMethod::Cash,
        ApiMethod::Credit => engine::PaymentMethod::Credit,
        ApiMethod::Debit => engine::PaymentMethod::Debit,
    }
}

fn view(release: Release) -> ReleaseView {
    ReleaseView {
        id: release.id.map(|id| id.to_string()).unwrap_or_default(),
        date: release.date,
        payment_method: api_method(release.payment_method),
        establishment_name: release.establishment_name,
        amount: api_types::render_amount(release.amount),
        created_at: release.created_at,
        updated_at: release.updated_at,
    }
}

fn cmd(body: ReleaseBody) -> ReleaseCmd {
    ReleaseCmd {
        date: body.date,
        payment_method: engine_method(body.payment_method),
        establishment_name: body.establishment_name,
        amount: body.amount,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ReleaseView>>, ServerError> {
    tracing::info!("listing releases");
    let releases = state
        .engine
        .releases()
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    if releases.is_empty() {
        return Err(ServerError::new(
            StatusCode::NOT_FOUND,
            fill(&state.messages.not_found, "Lançamento"),
        ));
    }

    Ok(Json(releases.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<ReleaseBody>,
) -> Result<(StatusCode, Json<ReleaseView>), ServerError> {
    tracing::info!(
        "creating release against \"{}\"",
        body.establishment_name
    );
    let created = state
        .engine
        .create_release(cmd(body))
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    Ok((StatusCode::CREATED, Json(view(created))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<ReleaseBody>,
) -> Result<Json<ReleaseView>, ServerError> {
    let id = parse_id(&state.messages, &id)?;
    tracing::info!("updating release {id}");
    let updated = state
        .engine
        .update_release(&id, cmd(body))
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    Ok(Json(view(updated)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ResponseDetails>, ServerError> {
    let id = parse_id(&state.messages, &id)?;
    tracing::info!("removing release {id}");
    state
        .engine
        .remove_release(&id)
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    Ok(Json(ResponseDetails {
        status_code: 200,
        message: fill(&state.messages.deleted_success, "Lançamento"),
    }))
}
