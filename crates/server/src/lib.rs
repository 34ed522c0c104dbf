use api_types::response::ResponseDetails;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use messages::{Messages, fill};
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod establishments;
mod messages;
mod releases;
mod server;
mod statements;

/// A finalized error response: status plus envelope message.
pub struct ServerError {
    status: StatusCode,
    message: String,
}

impl ServerError {
    pub fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    /// Maps an engine error onto the response contract, resolving the
    /// localized templates against `messages`.
    pub fn from_engine(messages: &Messages, err: EngineError) -> Self {
        let (status, message) = match err {
            EngineError::Validation(reason) => (StatusCode::BAD_REQUEST, reason),
            EngineError::InvalidId(_) => (
                StatusCode::BAD_REQUEST,
                messages.incorrect_id_format.clone(),
            ),
            EngineError::EstablishmentNotFound(_) => (
                StatusCode::NOT_FOUND,
                fill(&messages.not_found_given_id, "estabelecimento"),
            ),
            EngineError::ReleaseNotFound(_) => (
                StatusCode::NOT_FOUND,
                fill(&messages.not_found_given_id, "lançamento"),
            ),
            EngineError::UnknownEstablishment(_) => (
                StatusCode::NOT_FOUND,
                fill(&messages.cant_found_given_name, "estabelecimento"),
            ),
            EngineError::Conflict(_) => (
                StatusCode::NOT_ACCEPTABLE,
                fill(&messages.not_accepted, "estabelecimento"),
            ),
            EngineError::UpdateRejected => {
                (StatusCode::NOT_ACCEPTABLE, messages.cant_update.clone())
            }
            EngineError::RemoveRejected => {
                (StatusCode::NOT_ACCEPTABLE, messages.cant_remove.clone())
            }
            EngineError::NoReleases => (
                StatusCode::NOT_FOUND,
                fill(&messages.not_found, "Lançamentos"),
            ),
            EngineError::Integrity(name) => {
                tracing::error!("aggregation references unknown establishment \"{name}\"");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages.internal_error.clone(),
                )
            }
            EngineError::Database(db_err) => {
                tracing::error!("database error: {db_err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages.internal_error.clone(),
                )
            }
        };

        Self { status, message }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let body = ResponseDetails {
            status_code: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Parses a path identifier, answering the 400 envelope on bad format
/// before anything reaches the store.
fn parse_id(messages: &Messages, raw: &str) -> Result<engine::RecordId, ServerError> {
    engine::RecordId::parse(raw).map_err(|err| ServerError::from_engine(messages, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(err: EngineError) -> StatusCode {
        ServerError::from_engine(&Messages::default(), err)
            .into_response()
            .status()
    }

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(
            status_for(EngineError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(EngineError::InvalidId("123".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            status_for(EngineError::EstablishmentNotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(EngineError::ReleaseNotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(EngineError::UnknownEstablishment("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_for(EngineError::NoReleases), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflicts_map_to_406() {
        assert_eq!(
            status_for(EngineError::Conflict("x".to_string())),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            status_for(EngineError::UpdateRejected),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            status_for(EngineError::RemoveRejected),
            StatusCode::NOT_ACCEPTABLE
        );
    }

    #[test]
    fn integrity_maps_to_500() {
        assert_eq!(
            status_for(EngineError::Integrity("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
