use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use docsearch_core::{CorpusSource, DocId, DocumentSummary, SearchEngine, TokenizerKind};
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub type Engine = SearchEngine<TokenizerKind>;

const SNIPPET_BEFORE: usize = 100;
const SNIPPET_AFTER: usize = 200;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub document: DocumentSummary,
    pub score: f64,
    pub snippet: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<CorpusSource>,
    /// Swapped wholesale on reload; readers clone the inner `Arc` and release the lock.
    pub engine: Arc<RwLock<Arc<Engine>>>,
    pub admin_token: Option<String>,
}

impl AppState {
    fn engine(&self) -> Arc<Engine> {
        self.engine.read().clone()
    }
}

pub fn build_app(source: CorpusSource, admin_token: Option<String>) -> Result<Router> {
    // Build the whole engine before serving
    let engine = source.load()?;
    tracing::info!(dir = %source.dir.display(), num_docs = engine.num_docs(), num_tokens = engine.num_tokens(), "corpus indexed");
    let app_state = AppState { source: Arc::new(source), engine: Arc::new(RwLock::new(Arc::new(engine))), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/index/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let engine = state.engine();
    let hits = engine.search_scored(&params.q);
    let total_hits = hits.len();
    let k = params.k.clamp(1, 100);

    let pattern = term_pattern(&params.q);
    let results = hits
        .into_iter()
        .take(k)
        .map(|(doc, score)| SearchHit {
            document: doc.summary(),
            score,
            snippet: snippet(doc.content(), pattern.as_ref()),
        })
        .collect();

    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_ms: elapsed.as_millis(), took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let engine = state.engine();
    match engine.document(doc_id) {
        Some(doc) => {
            let mut obj = serde_json::json!(doc.summary());
            obj["text"] = serde_json::Value::String(doc.content().to_string());
            Ok(Json(obj))
        }
        None => Err((StatusCode::NOT_FOUND, format!("no document {doc_id}"))),
    }
}

/// Rebuild the engine from the corpus directory and swap it in.
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let source = Arc::clone(&state.source);
    let engine = tokio::task::spawn_blocking(move || source.load())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
    let body = serde_json::json!({ "num_docs": engine.num_docs(), "num_tokens": engine.num_tokens() });
    *state.engine.write() = Arc::new(engine);
    tracing::info!(%body, "engine reloaded");
    Ok(Json(body))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}

fn term_pattern(term: &str) -> Option<Regex> {
    let term = term.trim();
    if term.is_empty() { return None; }
    RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build().ok()
}

fn snippet(text: &str, pattern: Option<&Regex>) -> Option<String> {
    if text.is_empty() { return None; }
    let window = match pattern.and_then(|p| p.find(text)) {
        Some(mat) => {
            let start = floor_char_boundary(text, mat.start().saturating_sub(SNIPPET_BEFORE));
            let end = floor_char_boundary(text, (mat.start() + SNIPPET_AFTER).min(text.len()));
            &text[start..end]
        }
        None => {
            let end = text.char_indices().nth(SNIPPET_AFTER).map_or(text.len(), |(i, _)| i);
            &text[..end]
        }
    };
    Some(match pattern {
        Some(p) => p.replace_all(window, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).into_owned(),
        None => window.to_string(),
    })
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
