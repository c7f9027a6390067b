//! Response bodies shared by the catalogue handlers.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;

/// Body returned after a successful delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedRecord {
    pub id: Uuid,
}

/// `404` for a catalogue row that does not exist.
pub(crate) fn record_not_found(kind: &'static str, id: Uuid) -> Error {
    Error::not_found(format!("{kind} {id} not found")).with_details(json!({
        "resource": kind,
        "id": id,
    }))
}
