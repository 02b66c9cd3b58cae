//! Common test utilities for E2E tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{MethodRouter, post},
};
use gatehouse::{AppState, config};
use tokio::net::TcpListener;

/// How the fake backend answers one endpoint
#[derive(Clone)]
pub enum Reply {
    /// JSON body with status 200
    Json(serde_json::Value),
    /// Non-JSON body with status 200
    Text(&'static str),
    /// Sleep before answering
    Hang(Duration),
}

#[derive(Default)]
struct FakeState {
    replies: Mutex<HashMap<&'static str, Reply>>,
    calls: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl FakeState {
    async fn respond(&self, endpoint: &'static str, body: String) -> Response {
        let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        self.calls.lock().unwrap().push((endpoint, body));

        let reply = self.replies.lock().unwrap().get(endpoint).cloned();
        match reply {
            Some(Reply::Json(value)) => Json(value).into_response(),
            Some(Reply::Text(text)) => text.into_response(),
            Some(Reply::Hang(delay)) => {
                tokio::time::sleep(delay).await;
                Json(serde_json::json!({ "success": false })).into_response()
            }
            None => Json(serde_json::json!({
                "success": false,
                "message": "not configured",
            }))
            .into_response(),
        }
    }
}

/// Stand-in for the backend auth service that records every call
pub struct FakeBackend {
    pub addr: String,
    state: Arc<FakeState>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());

        let app = Router::new()
            .route("/login", endpoint("login"))
            .route("/signup", endpoint("signup"))
            .route("/verify", endpoint("verify"))
            .route("/logout", endpoint("logout"))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Set the reply for an endpoint ("login", "signup", "verify", "logout")
    pub fn reply(&self, endpoint: &'static str, reply: Reply) {
        self.state.replies.lock().unwrap().insert(endpoint, reply);
    }

    /// Number of calls made to an endpoint
    pub fn calls(&self, endpoint: &str) -> usize {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == endpoint)
            .count()
    }

    /// Total number of calls made to any endpoint
    pub fn total_calls(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    /// JSON body of the most recent call to an endpoint
    pub fn last_body(&self, endpoint: &str) -> Option<serde_json::Value> {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| *name == endpoint)
            .map(|(_, body)| body.clone())
    }
}

fn endpoint(name: &'static str) -> MethodRouter<Arc<FakeState>> {
    post(move |State(fake): State<Arc<FakeState>>, body: String| async move {
        fake.respond(name, body).await
    })
}

/// URL of a port nothing is listening on
pub async fn unreachable_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Test configuration pointing at `backend_url`
pub fn test_config(backend_url: &str, timeout_ms: u64) -> config::AppConfig {
    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        backend: config::BackendConfig {
            url: backend_url.parse().unwrap(),
            timeout_ms,
        },
        cookie: config::CookieConfig {
            secure: false,
            max_age_seconds: 604_800,
        },
    }
}

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    /// Client that does not follow redirects
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server talking to `backend_url`
    pub async fn new(backend_url: &str) -> Self {
        Self::with_config(test_config(backend_url, 3000)).await
    }

    pub async fn with_config(config: config::AppConfig) -> Self {
        let state = AppState::new(config).unwrap();

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let app = gatehouse::build_router(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            client,
        }
    }

    /// Get URL for a path on the gateway
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// POST a urlencoded form
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("request succeeds")
    }

    /// GET with a `session_id` cookie
    pub async fn get_with_session(&self, path: &str, session_id: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .header("Cookie", format!("session_id={session_id}"))
            .send()
            .await
            .expect("request succeeds")
    }
}

/// All `Set-Cookie` header values of a response
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok().map(ToString::to_string))
        .collect()
}

/// `Location` header of a redirect
pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
