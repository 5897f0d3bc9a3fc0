use axum::{
    Router,
    extract::{Path, State, rejection::PathRejection},
    http::Uri,
    response::Json,
    routing::get,
};

use crate::lookup::TemperatureLookup;
use crate::models::TemperatureResponse;

pub mod error;

pub use error::ApiError;

/// Single route: `GET /{cep}`
pub fn router(lookup: TemperatureLookup) -> Router {
    Router::new()
        .route("/{cep}", get(get_temperature))
        .with_state(lookup)
}

async fn get_temperature(
    State(lookup): State<TemperatureLookup>,
    cep: Result<Path<String>, PathRejection>,
    uri: Uri,
) -> Result<Json<TemperatureResponse>, ApiError> {
    let cep = match cep {
        Ok(Path(cep)) => cep,
        Err(rejection) => {
            tracing::debug!("Falling back to lossy path decoding: {}", rejection);
            decode_segment_lossy(uri.path())
        }
    };
    let response = lookup.lookup(&cep).await?;
    Ok(Json(response))
}

/// Percent-decode the path segment, replacing invalid UTF-8 so the digit
/// filter still sees every valid character
fn decode_segment_lossy(path: &str) -> String {
    let segment = path.trim_start_matches('/');
    String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
}
