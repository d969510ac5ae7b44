use super::*;
use axum::{
    extract::{Path, State},
    http::{StatusCode as AxumStatus, Uri},
    routing::get,
    Json, Router,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct ApiState {
    /// Raw (still percent-encoded) request paths, in arrival order.
    seen_paths: Arc<Mutex<Vec<String>>>,
}

async fn spawn_api(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn handle_filme(
    State(state): State<ApiState>,
    uri: Uri,
    Path(title): Path<String>,
) -> Json<serde_json::Value> {
    state
        .seen_paths
        .lock()
        .expect("seen_paths lock")
        .push(uri.path().to_owned());
    Json(serde_json::json!({
        "titulo": title,
        "nota": 8.7,
        "lancamento": "2002-08-30",
        "sinopse": "Duas décadas de crime organizado na Cidade de Deus.",
        "poster": "/posters/cidade-de-deus.jpg",
        "onde_assistir": {
            "flatrate": [{ "provider_name": "Netflix" }]
        }
    }))
}

fn filme_router(state: ApiState) -> Router {
    Router::new()
        .route("/filme/:title", get(handle_filme))
        .with_state(state)
}

#[tokio::test]
async fn looks_up_record_and_decodes_portuguese_fields() {
    let url = spawn_api(filme_router(ApiState::default())).await;
    let api = MovieApi::new(url);

    let record = api.lookup("Cidade de Deus").await.expect("lookup succeeds");

    assert_eq!(record.title, "Cidade de Deus");
    assert_eq!(record.rating, 8.7);
    assert_eq!(record.release_date.to_string(), "2002-08-30");
    assert_eq!(
        record.synopsis.as_deref(),
        Some("Duas décadas de crime organizado na Cidade de Deus.")
    );
    assert_eq!(
        record.poster_url.as_deref(),
        Some("/posters/cidade-de-deus.jpg")
    );
    let providers = record.watch_providers.expect("providers present");
    assert_eq!(providers.provider_names(), vec!["Netflix"]);
}

#[tokio::test]
async fn percent_encodes_title_into_request_path() {
    let state = ApiState::default();
    let url = spawn_api(filme_router(state.clone())).await;
    let api = MovieApi::new(url);

    let record = api
        .lookup("Senhor dos Anéis")
        .await
        .expect("lookup succeeds");

    // The server-side decode must round-trip the accented title exactly.
    assert_eq!(record.title, "Senhor dos Anéis");
    let seen = state.seen_paths.lock().expect("seen_paths lock");
    assert_eq!(seen.as_slice(), ["/filme/Senhor%20dos%20An%C3%A9is"]);
}

#[tokio::test]
async fn non_success_status_is_a_lookup_error() {
    async fn not_found() -> (AxumStatus, Json<serde_json::Value>) {
        (
            AxumStatus::NOT_FOUND,
            Json(serde_json::json!({ "erro": "Filme não encontrado" })),
        )
    }
    let app = Router::new().route("/filme/:title", get(not_found));
    let api = MovieApi::new(spawn_api(app).await);

    let err = api
        .lookup("Filme Inexistente")
        .await
        .expect_err("404 must fail the lookup");

    match err {
        LookupError::Status { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("Filme não encontrado"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_record_is_a_lookup_error() {
    async fn partial_record() -> Json<serde_json::Value> {
        Json(serde_json::json!({ "titulo": "Matrix" }))
    }
    let app = Router::new().route("/filme/:title", get(partial_record));
    let api = MovieApi::new(spawn_api(app).await);

    let err = api
        .lookup("Matrix")
        .await
        .expect_err("missing fields must fail the lookup");

    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn unreachable_api_is_a_lookup_error() {
    // Bind then drop to get a port that is almost certainly closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("listener addr");
    drop(listener);

    let api = MovieApi::new(format!("http://{addr}"));
    let err = api
        .lookup("Matrix")
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, LookupError::Transport(_)));
}

#[tokio::test]
async fn fetches_poster_bytes_relative_to_api_origin() {
    async fn poster_bytes() -> Vec<u8> {
        b"\x89PNG fake poster".to_vec()
    }
    let app = Router::new().route("/posters/:name", get(poster_bytes));
    let api = MovieApi::new(spawn_api(app).await);

    let bytes = api
        .fetch_bytes("/posters/matrix.png")
        .await
        .expect("poster download succeeds");

    assert_eq!(bytes, b"\x89PNG fake poster");
}

#[tokio::test]
async fn poster_download_failure_is_a_lookup_error() {
    async fn gone() -> AxumStatus {
        AxumStatus::GONE
    }
    let app = Router::new().route("/posters/:name", get(gone));
    let api = MovieApi::new(spawn_api(app).await);

    let err = api
        .fetch_bytes("/posters/matrix.png")
        .await
        .expect_err("410 must fail the download");

    assert!(matches!(err, LookupError::Status { .. }));
}

#[test]
fn resolves_relative_urls_against_the_api_origin() {
    let api = MovieApi::new("http://localhost:3000");
    assert_eq!(
        api.resolve_url("/posters/matrix.png"),
        "http://localhost:3000/posters/matrix.png"
    );
    assert_eq!(
        api.resolve_url("https://image.tmdb.org/t/p/w500/matrix.jpg"),
        "https://image.tmdb.org/t/p/w500/matrix.jpg"
    );
}

#[test]
fn strips_trailing_slashes_from_the_base_url() {
    let api = MovieApi::new("http://localhost:3000//");
    assert_eq!(api.base_url(), "http://localhost:3000");
}
