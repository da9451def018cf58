pub mod animations;
pub mod diseases;
pub mod predict;
pub mod system;

pub use animations::*;
pub use diseases::*;
pub use predict::*;
pub use system::*;

use axum::http::StatusCode;

use crate::error::VitalisError;

/// Map a domain error onto an HTTP response.
///
/// Incomplete submissions are 422 so the form can re-prompt; bad keys and
/// non-numeric values are 400; everything else is a flat 500 with the error
/// text, mirroring the "caught, shown, never crashes" submission contract.
pub(crate) fn error_response(err: &VitalisError) -> (StatusCode, String) {
    let status = match err {
        VitalisError::IncompleteSubmission { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        VitalisError::Coercion { .. } | VitalisError::UnknownDisease(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
