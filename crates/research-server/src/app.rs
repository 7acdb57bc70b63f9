//! Axum application builder

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use research_utils::{EnvSource, ProcessEnv};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Create the Axum application with all routes.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/health", get(routes::health))
        .route("/analyze", get(routes::analyze_get).post(routes::analyze_post))
        .route("/api/analyze", get(routes::analyze_get).post(routes::analyze_post))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Create config from `HOST` and `PORT`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(env: &impl EnvSource) -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: env.string_or("HOST", &defaults.host),
            port: env.parse_or("PORT", defaults.port)?,
        })
    }

    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available; run until killed
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use research_llm::{CompletionRequest, CompletionResponse, LLMProvider, Message, StopReason, TokenUsage};
    use research_stock::api::{DocumentFetcher, InstantAnswer, InstantAnswerResult, NewsFeed, NewsItem};
    use research_stock::{ResearchConfig, ResearchError, Sources, StockResearcher};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct StaticFeed;

    #[async_trait]
    impl NewsFeed for StaticFeed {
        async fn search(&self, query: &str) -> research_stock::Result<Vec<NewsItem>> {
            Ok(vec![NewsItem {
                title: format!("headline: {query}"),
                link: "https://news.example.com/1".to_string(),
                published: None,
            }])
        }
    }

    struct NoDocuments;

    #[async_trait]
    impl DocumentFetcher for NoDocuments {
        async fn fetch_html(&self, url: &str) -> research_stock::Result<String> {
            Err(ResearchError::Api(format!("no route to {url}")))
        }
    }

    struct NoAnswer;

    #[async_trait]
    impl InstantAnswer for NoAnswer {
        async fn lookup(&self, _query: &str) -> research_stock::Result<InstantAnswerResult> {
            Ok(InstantAnswerResult::default())
        }
    }

    #[derive(Default)]
    struct EchoLlm {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LLMProvider for EchoLlm {
        async fn complete(&self, request: CompletionRequest) -> research_llm::Result<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let prompt = request.prompt();
            let first_line = prompt.lines().next().unwrap_or_default();
            Ok(CompletionResponse {
                message: Message::assistant(format!("## Summary\n{first_line}")),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn app_with(config: &ResearchConfig) -> (Router, Arc<EchoLlm>) {
        let sources = Sources {
            news: Arc::new(StaticFeed),
            filings: None,
            sec_documents: Arc::new(NoDocuments),
            web_pages: Arc::new(NoDocuments),
            search: None,
            instant: Arc::new(NoAnswer),
        };
        let llm = Arc::new(EchoLlm::default());
        let researcher = StockResearcher::with_sources(config, &sources).with_provider(llm.clone());
        (create_app(AppState::new(researcher)), llm)
    }

    fn keyed() -> ResearchConfig {
        ResearchConfig::builder()
            .groq_api_key("gsk_test")
            .default_ticker("amzn")
            .build()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_routes() {
        let (app, _) = app_with(&keyed());
        for uri in ["/health", "/api/health"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await, serde_json::json!({"ok": true}));
        }
    }

    #[tokio::test]
    async fn test_index_page() {
        let (app, _) = app_with(&keyed());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/analyze"));
    }

    #[tokio::test]
    async fn test_analyze_get_normalizes_ticker() {
        let (app, llm) = app_with(&keyed());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/analyze?ticker=%20aapl%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["ticker"], "AAPL");
        assert_eq!(body["report"], "## Summary\nAnalyze ticker AAPL using this context:");
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_defaults() {
        let (app, _) = app_with(&keyed());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/analyze").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await["ticker"], "AMZN");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["ticker"], "AMZN");
    }

    #[tokio::test]
    async fn test_analyze_post_body() {
        let (app, _) = app_with(&keyed());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"ticker": "nvda"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(json_body(response).await["ticker"], "NVDA");
    }

    #[tokio::test]
    async fn test_blank_ticker_is_400() {
        let (app, llm) = app_with(&keyed());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze")
                    .body(Body::from(r#"{"ticker": "   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"ok": false, "error": "ticker is required"})
        );
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_llm_keys_is_500() {
        let (app, llm) = app_with(&ResearchConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/analyze?ticker=aapl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["ticker"], "AAPL");
        assert!(body["error"].as_str().unwrap().contains("GROQ_API_KEY"));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_server_config() {
        let env: HashMap<&str, &str> = [("PORT", "8080")].into_iter().collect();
        let config = ServerConfig::from_source(&env).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");

        let env: HashMap<&str, &str> = [("PORT", "http")].into_iter().collect();
        assert!(ServerConfig::from_source(&env).is_err());

        assert_eq!(ServerConfig::default().port, 5000);
    }
}
