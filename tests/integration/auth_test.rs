//! Integration tests for login and the saved token.

mod helpers;

use serde_json::json;

use alquiler_cli::context::ClientContext;
use alquiler_core::error::ErrorKind;
use alquiler_core::traits::IdentityProvider;

#[tokio::test]
async fn test_login_returns_token_and_role() {
    let backend = helpers::MockBackend::start().await;
    let token = helpers::jwt(json!({ "sub": "owner-1", "role": "PROPIETARIO" }));
    *backend.state.login_token.lock().expect("lock") = token.clone();
    *backend.state.login_role.lock().expect("lock") = Some("PROPIETARIO".to_string());
    let config = backend.config();

    let api = helpers::auth_api(&config, helpers::identity(&config, None));
    let response = api
        .login("owner@example.org", helpers::PASSWORD)
        .await
        .expect("login");

    assert_eq!(response.token, token);
    assert_eq!(response.rol.as_deref(), Some("PROPIETARIO"));
}

#[tokio::test]
async fn test_role_falls_back_to_token_claims() {
    let backend = helpers::MockBackend::start().await;
    let token = helpers::jwt(json!({ "sub": "alumno-9", "roles": ["ALUMNO"] }));
    *backend.state.login_token.lock().expect("lock") = token;
    let config = backend.config();
    let identity = helpers::identity(&config, None);

    let response = helpers::auth_api(&config, identity.clone())
        .login("ana@example.org", helpers::PASSWORD)
        .await
        .expect("login");
    assert!(response.rol.is_none());

    identity.set_token(&response.token);
    assert_eq!(identity.role().as_deref(), Some("ALUMNO"));
    assert_eq!(identity.subject().as_deref(), Some("alumno-9"));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let backend = helpers::MockBackend::start().await;
    let config = backend.config();

    let err = helpers::auth_api(&config, helpers::identity(&config, None))
        .login("ana@example.org", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_context_uses_saved_token() {
    let backend = helpers::MockBackend::start().await;
    let mut config = backend.config();
    let token_file = std::env::temp_dir()
        .join(format!("alquiler-it-{}", std::process::id()))
        .join("token");
    config.auth.token_file = token_file.display().to_string();

    let token = helpers::jwt(json!({ "sub": "alumno-5" }));
    let ctx = ClientContext::new(&config).await.expect("context");
    assert!(ctx.require_login().is_err());
    ctx.store.save(&token).await.expect("save token");

    let ctx = ClientContext::new(&config).await.expect("context");
    assert_eq!(ctx.identity.bearer_token().as_deref(), Some(token.as_str()));
    assert_eq!(ctx.identity.subject().as_deref(), Some("alumno-5"));

    ctx.booking_session().list().load_all().await;
    let auth = backend.state.authorization.lock().expect("lock").clone();
    assert_eq!(auth, vec![Some(format!("Bearer {token}"))]);

    ctx.store.clear().await.expect("clear token");
}
