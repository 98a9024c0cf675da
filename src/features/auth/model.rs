use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Session context established by the auth middleware.
///
/// The only identity the rest of the service sees: `sub` is the owner key on
/// every report, the email is display-only and absent for machine tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
