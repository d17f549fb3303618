mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{MockBackend, PASSWORD, TOKEN, USERNAME};

use alamal_console::api::{ApiClient, AuthGateway, EngineerGateway, ResourceGateway};
use alamal_console::models::LoginRequest;
use alamal_console::session::{Session, SessionStore};

fn credentials(password: &str) -> LoginRequest {
    LoginRequest {
        username: USERNAME.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn login_stores_token_and_username() -> Result<()> {
    let backend = MockBackend::start().await?;
    let client = backend.anonymous_client()?;
    let auth = AuthGateway::new(client.clone());

    let response = auth.login(&credentials(PASSWORD)).await?;
    assert_eq!(response.token, TOKEN);
    assert_eq!(client.session().token().as_deref(), Some(TOKEN));
    assert_eq!(client.session().username().as_deref(), Some(USERNAME));
    Ok(())
}

#[tokio::test]
async fn rejected_login_reports_server_message() -> Result<()> {
    let backend = MockBackend::start().await?;
    let client = backend.anonymous_client()?;

    let err = AuthGateway::new(client.clone())
        .login(&credentials("wrong"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.display_message("Login failed"), "Invalid username or password");
    assert!(!client.session().is_logged_in());
    Ok(())
}

#[tokio::test]
async fn requests_carry_the_token_current_at_call_time() -> Result<()> {
    let backend = MockBackend::start().await?;
    let client = backend.anonymous_client()?;
    let engineers = EngineerGateway::new(client.clone());

    let err = engineers.list().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    AuthGateway::new(client.clone()).login(&credentials(PASSWORD)).await?;
    assert_eq!(engineers.list().await?.len(), 3);

    client.session().logout()?;
    assert!(engineers.list().await.is_err());

    let expected = format!("Bearer {}", TOKEN);
    assert_eq!(backend.auth_headers(), vec![None, Some(expected), None]);
    Ok(())
}

#[tokio::test]
async fn session_survives_reopen_until_logout() -> Result<()> {
    let backend = MockBackend::start().await?;
    let dir = common::temp_dir();

    let session = Arc::new(Session::open(SessionStore::in_dir(&dir))?);
    let client = ApiClient::new(&backend.base_url, session)?;
    AuthGateway::new(client).login(&credentials(PASSWORD)).await?;

    let reopened = Session::open(SessionStore::in_dir(&dir))?;
    assert_eq!(reopened.token().as_deref(), Some(TOKEN));
    assert_eq!(reopened.username().as_deref(), Some(USERNAME));

    reopened.logout()?;
    let after_logout = Session::open(SessionStore::in_dir(&dir))?;
    assert!(!after_logout.is_logged_in());

    std::fs::remove_dir_all(&dir).ok();
    Ok(())
}
