//! Statement API endpoints.

use api_types::statement::StatementView;
use axum::{Json, extract::State};
use engine::Statement;

use crate::releases::api_method;
use crate::{ServerError, server::ServerState};

fn view(statement: Statement) -> StatementView {
    let method = api_method(statement.payment_method);
    StatementView {
        date: statement.date,
        payment_method: method,
        payment_method_display: method.display_label(),
        kind: statement.kind,
        total_amount: api_types::render_amount(statement.total_amount),
    }
}

/// Aggregates the current ledger on every call; nothing is cached or
/// persisted between requests.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<StatementView>>, ServerError> {
    tracing::info!("aggregating statements");
    let statements = state
        .engine
        .statements()
        .await
        .map_err(|err| ServerError::from_engine(&state.messages, err))?;

    Ok(Json(statements.into_iter().map(view).collect()))
}
