mod common;

use common::{TestApp, assert_flash, unique_username};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("health request failed");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_logout_flow() {
    let app = TestApp::spawn().await;
    let username = unique_username("alice");

    // Register
    let response = app.register(&username, "secret1").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/login");
    assert_flash(&response, "Registration successful. Please log in.");

    // Login
    let response = app.login(&username, "secret1").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/");
    assert_flash(&response, "Welcome back!");

    // The listing now renders for this session and greets the user
    let body = app.index("").await;
    assert_eq!(body["username"], username.as_str());

    // Logout clears the session
    let response = app
        .client
        .get(app.url("/logout"))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(response.status(), 303);
    assert_flash(&response, "Logged out successfully");

    // The session is revoked server-side, not just cookie-cleared
    let response = app
        .client
        .get(app.url("/"))
        .send()
        .await
        .expect("index request failed");
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/login");
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let app = TestApp::spawn().await;

    let response = app.register("al", "secret1").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/register");
    assert_flash(&response, "Username must be at least 3 characters");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::spawn().await;

    let response = app.register(&unique_username("bob"), "12345").await;
    assert_eq!(response.status(), 303);
    assert_flash(&response, "Password must be at least 6 characters");
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let app = TestApp::spawn().await;
    let username = unique_username("carol");

    let response = app.register(&username, "secret1").await;
    assert_eq!(response.headers().get("location").unwrap(), "/login");

    let response = app.register(&username, "other-secret").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/register");
    assert_flash(&response, "Username already exists");
}

#[tokio::test]
async fn test_login_is_generic_about_failures() {
    let app = TestApp::spawn().await;
    let username = unique_username("dave");
    app.register(&username, "secret1").await;

    // Unknown username and wrong password fail identically
    let response = app.login("nobody", "secret1").await;
    assert_flash(&response, "Invalid credentials");

    let response = app.login(&username, "wrong-password").await;
    assert_flash(&response, "Invalid credentials");
}

#[tokio::test]
async fn test_concurrent_authenticated_requests_share_the_pool() {
    let app = TestApp::spawn().await;
    let username = unique_username("eve");
    app.register_and_login(&username, "secret1").await;

    // The test pool holds a single connection, so these only complete if the
    // session check releases its connection before the handler runs.
    let (a, b, c) = tokio::join!(app.index(""), app.index(""), app.index(""));
    for body in [a, b, c] {
        assert_eq!(body["username"], username.as_str());
    }
}

#[tokio::test]
async fn test_login_sweeps_expired_sessions() {
    let app = TestApp::spawn().await;
    let username = unique_username("frank");
    app.register(&username, "secret1").await;

    // First session, then age it past its expiry
    let stale = TestApp::new_client();
    app.login_with(&stale, &username, "secret1").await;
    sqlx::query("UPDATE sessions SET expires_at = ?")
        .bind(chrono::Utc::now() - chrono::Duration::hours(1))
        .execute(&app.pool)
        .await
        .unwrap();

    // A fresh login removes the expired row, leaving only the new session
    app.login(&username, "secret1").await;
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let app = TestApp::spawn().await;

    for path in [
        "/",
        "/categories",
        "/export",
        "/edit/1",
        "/delete/1",
        "/delete_category/1",
    ] {
        let response = app
            .client
            .get(app.url(path))
            .send()
            .await
            .expect("request failed");
        assert_eq!(response.status(), 303, "{path} should require a session");
        assert_eq!(response.headers().get("location").unwrap(), "/login");
        assert_flash(&response, "Please log in first");
    }
}
