//! Profile provisioning endpoint.
//!
//! ```text
//! POST /api/profiles/ensure {"id":"auth0|42","email":"ada@example.com"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{EnsureProfileRequest, Error, Profile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_profile_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// Request body for `POST /api/profiles/ensure`.
///
/// Every field is optional at the wire level so a missing `id` yields the
/// standard `missing_field` error rather than a deserialisation failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EnsureProfileBody {
    #[schema(example = "8d0f1c9e-4b7a-4f1e-9a57-2f4c1d0b6a11")]
    pub id: Option<String>,
    #[schema(example = "ada.lovelace@example.com")]
    pub email: Option<String>,
    #[schema(example = "Ada")]
    pub name: Option<String>,
}

impl TryFrom<EnsureProfileBody> for EnsureProfileRequest {
    type Error = Error;

    fn try_from(body: EnsureProfileBody) -> Result<Self, Self::Error> {
        Ok(Self {
            id: require_profile_id(body.id, ID_FIELD)?,
            email: body.email,
            name: body.name,
        })
    }
}

/// Response envelope for the ensured profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnsureProfileResponse {
    pub profile: Profile,
}

/// Return the caller's profile, creating it on first use.
///
/// Safe to call concurrently for the same id: every caller receives the
/// same stored row.
#[utoipa::path(
    post,
    path = "/api/profiles/ensure",
    request_body = EnsureProfileBody,
    responses(
        (status = 200, description = "Existing or newly created profile", body = EnsureProfileResponse),
        (status = 400, description = "Missing or blank id", body = Error),
        (status = 500, description = "Store not configured or store failure", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "ensureProfile"
)]
#[post("/profiles/ensure")]
pub async fn ensure_profile(
    state: web::Data<HttpState>,
    payload: web::Json<EnsureProfileBody>,
) -> ApiResult<web::Json<EnsureProfileResponse>> {
    let request = EnsureProfileRequest::try_from(payload.into_inner())?;
    debug!(profile_id = %request.id, "ensuring profile");
    let profile = state.profiles.ensure_profile(request).await?;
    Ok(web::Json(EnsureProfileResponse { profile }))
}
