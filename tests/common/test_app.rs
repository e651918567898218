use reqwest::{Client, Response, redirect::Policy};
use rolodex::{AppState, Config, DbPool, app};
use sqlx::sqlite::SqlitePoolOptions;

/// HTTP test application wrapper
///
/// Manages an Axum server over a fresh in-memory SQLite database on a random
/// port. Each test gets its own server instance to allow parallel execution.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client with a cookie store, acting as one browser session
    pub client: Client,
    /// Database pool backing the server
    pub pool: DbPool,
}

impl TestApp {
    /// Spawn a server on a random port over an in-memory database.
    ///
    /// The pool is capped at one connection so every request sees the same
    /// in-memory database.
    pub async fn spawn() -> Self {
        let config = Config::default();

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });

        Self {
            address,
            client: Self::new_client(),
            pool,
        }
    }

    /// A fresh client with its own cookie store: a second "browser" for
    /// multi-user tests. Redirects are not followed so flashes and Location
    /// headers stay observable.
    pub fn new_client() -> Client {
        Client::builder()
            .redirect(Policy::none())
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Get the full URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register_with(&self, client: &Client, username: &str, password: &str) -> Response {
        client
            .post(self.url("/register"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("register request failed")
    }

    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.register_with(&self.client, username, password).await
    }

    pub async fn login_with(&self, client: &Client, username: &str, password: &str) -> Response {
        client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("login request failed")
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.login_with(&self.client, username, password).await
    }

    /// Register and log in, asserting both succeed.
    pub async fn register_and_login_with(&self, client: &Client, username: &str, password: &str) {
        let response = self.register_with(client, username, password).await;
        assert_eq!(response.status(), 303, "registration should redirect");
        let response = self.login_with(client, username, password).await;
        assert_eq!(response.status(), 303, "login should redirect");
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/",
            "login should land on the listing"
        );
    }

    pub async fn register_and_login(&self, username: &str, password: &str) {
        self.register_and_login_with(&self.client, username, password)
            .await
    }

    pub async fn add_contact_with(&self, client: &Client, fields: &[(&str, &str)]) -> Response {
        client
            .post(self.url("/add"))
            .form(fields)
            .send()
            .await
            .expect("add contact request failed")
    }

    pub async fn add_contact(&self, fields: &[(&str, &str)]) -> Response {
        self.add_contact_with(&self.client, fields).await
    }

    /// Fetch the listing view model; `query` is a raw query string such as
    /// `"?search=sam&page=2"` or `""`.
    pub async fn index_with(&self, client: &Client, query: &str) -> serde_json::Value {
        let response = client
            .get(self.url(&format!("/{query}")))
            .send()
            .await
            .expect("index request failed");
        assert_eq!(response.status(), 200, "listing should render");
        response.json().await.expect("listing should be JSON")
    }

    pub async fn index(&self, query: &str) -> serde_json::Value {
        self.index_with(&self.client, query).await
    }

    /// Fetch the categories view model.
    pub async fn categories_with(&self, client: &Client) -> serde_json::Value {
        let response = client
            .get(self.url("/categories"))
            .send()
            .await
            .expect("categories request failed");
        assert_eq!(response.status(), 200, "categories page should render");
        response.json().await.expect("categories should be JSON")
    }

    pub async fn categories(&self) -> serde_json::Value {
        self.categories_with(&self.client).await
    }
}
