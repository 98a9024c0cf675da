use axum::Json;

use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;

/// Current session context
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated caller", body = ApiResponse<AuthenticatedUser>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn get_me(user: AuthenticatedUser) -> Json<ApiResponse<AuthenticatedUser>> {
    Json(ApiResponse::success(Some(user), None, None))
}

#[cfg(test)]
mod tests {
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::auth::routes;
    use crate::shared::test_helpers::with_test_auth;
    use crate::shared::types::ApiResponse;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_me_requires_a_session() {
        let server = TestServer::new(routes::routes()).unwrap();

        let response = server.get("/api/auth/me").await;

        response.assert_status_unauthorized();
        let body: ApiResponse<AuthenticatedUser> = response.json();
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_me_returns_the_session_context() {
        let server = TestServer::new(with_test_auth(routes::routes())).unwrap();

        let response = server.get("/api/auth/me").await;

        response.assert_status_ok();
        let body: ApiResponse<AuthenticatedUser> = response.json();
        assert!(body.success);
        let user = body.data.expect("session context in response");
        assert_eq!(user.sub, "test-sub");
        assert_eq!(user.email.as_deref(), Some("citizen@example.com"));
    }
}
