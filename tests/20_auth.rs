mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_login_refresh_flow() -> Result<()> {
    let Some(server) = common::server_if_configured().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let email = common::unique_email("auth-flow");

    // Register
    let res = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({ "name": "Test User", "email": email, "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["email"], email.as_str());

    // Registering the same email again fails with 400
    let res = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({ "name": "Test User", "email": email, "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Login
    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let access_token = body["data"]["accessToken"].as_str().unwrap().to_string();

    // Whoami with the access token
    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .bearer_auth(&access_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["email"], email.as_str());

    // Refresh yields a fresh access token
    let res = client
        .post(format!("{}/api/auth/refresh", server.base_url))
        .json(&json!({ "refreshToken": refresh_token }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"]["accessToken"].is_string());

    Ok(())
}

#[tokio::test]
async fn bad_credentials_and_bad_refresh_are_401() -> Result<()> {
    let Some(server) = common::server_if_configured().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": "ghost@example.com", "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Invalid email or password");

    let res = client
        .post(format!("{}/api/auth/refresh", server.base_url))
        .json(&json!({ "refreshToken": "tampered.token.value" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Invalid refresh token");

    Ok(())
}
