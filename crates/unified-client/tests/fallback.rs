//! Loader fallback-policy integration tests
//!
//! The client runs against an in-process axum backend on an ephemeral port.
//! Request counters verify the wire-level guarantees: no data request
//! without a credential, at-most-once login, verbatim payloads, and
//! independent per-loader degradation.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::task::JoinHandle;
use unified_client::{ApiClient, ClientConfig, LoadError, Session};
use unified_types::{DashboardKpis, LoginRequest, LoginResponse, Product, SyncStatus};

struct Backend {
    login_calls: AtomicUsize,
    data_calls: AtomicUsize,
    reject_login: AtomicBool,
    kpis_status: AtomicU16,
    last_products_query: Mutex<Option<String>>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            login_calls: AtomicUsize::new(0),
            data_calls: AtomicUsize::new(0),
            reject_login: AtomicBool::new(false),
            kpis_status: AtomicU16::new(200),
            last_products_query: Mutex::new(None),
        }
    }
}

fn sample_kpis() -> DashboardKpis {
    DashboardKpis {
        products_total: 42,
        variants_total: 120,
        suppliers_total: 7,
        purchase_orders_open: 3,
        inbound_shipments_active: 2,
        low_stock_alerts_open: 5,
        stock_value_fifo: 10234.5,
        stock_value_wac: 10180.25,
    }
}

fn sample_sync_status() -> SyncStatus {
    SyncStatus {
        pending: 4,
        processed: 9,
        failed: 1,
        last_error: None,
    }
}

fn sample_product() -> Product {
    Product {
        id: 1,
        sku: "ABC".to_string(),
        ean: None,
        status: "active".to_string(),
        product_type: "simple".to_string(),
        is_tobacco: false,
    }
}

async fn login(State(backend): State<Arc<Backend>>, Json(body): Json<LoginRequest>) -> Response {
    backend.login_calls.fetch_add(1, Ordering::SeqCst);
    if backend.reject_login.load(Ordering::SeqCst) || body.email != "admin@unified.local" {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(LoginResponse {
        access_token: "demo-token".to_string(),
    })
    .into_response()
}

async fn kpis(State(backend): State<Arc<Backend>>) -> Response {
    backend.data_calls.fetch_add(1, Ordering::SeqCst);
    match backend.kpis_status.load(Ordering::SeqCst) {
        200 => Json(sample_kpis()).into_response(),
        code => StatusCode::from_u16(code).unwrap().into_response(),
    }
}

async fn sync_status(State(backend): State<Arc<Backend>>) -> Response {
    backend.data_calls.fetch_add(1, Ordering::SeqCst);
    Json(sample_sync_status()).into_response()
}

async fn products(State(backend): State<Arc<Backend>>, RawQuery(query): RawQuery) -> Response {
    backend.data_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_products_query.lock().unwrap() = query;
    Json(vec![sample_product()]).into_response()
}

async fn spawn_backend() -> (SocketAddr, Arc<Backend>, JoinHandle<()>) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/dashboard/kpis", get(kpis))
        .route("/api/v1/integration/sync-status", get(sync_status))
        .route("/api/v1/products", get(products))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Own the per-connection tasks in a JoinSet so that aborting this handle
    // (dropping the JoinSet) tears down live keep-alive connections too —
    // `axum::serve` would instead detach them via `tokio::spawn`, leaving a
    // pooled connection alive to serve requests after `abort()`.
    let server = tokio::spawn(async move {
        let mut conns = tokio::task::JoinSet::new();
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => continue,
            };
            let tower_service = app.clone();
            conns.spawn(async move {
                let io = hyper_util::rt::TokioIo::new(stream);
                let hyper_service =
                    hyper_util::service::TowerToHyperService::new(tower_service);
                let _ = hyper_util::server::conn::auto::Builder::new(
                    hyper_util::rt::TokioExecutor::new(),
                )
                .serve_connection_with_upgrades(io, hyper_service)
                .await;
            });
        }
    });
    (addr, backend, server)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(ClientConfig::new(format!("http://{addr}"))).unwrap()
}

#[tokio::test]
async fn missing_credential_issues_no_data_request() {
    let (addr, backend, _server) = spawn_backend().await;
    backend.reject_login.store(true, Ordering::SeqCst);

    let client = client_for(addr);
    let session = Session::new();

    let result = client.dashboard_kpis(&session).await;
    assert!(matches!(&result, Err(LoadError::NotAuthenticated)));
    assert_eq!(backend.data_calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.unwrap_or_default(), DashboardKpis::default());
}

#[tokio::test]
async fn server_error_collapses_to_the_same_default() {
    let (addr, backend, _server) = spawn_backend().await;
    backend.kpis_status.store(500, Ordering::SeqCst);

    let client = client_for(addr);
    let session = Session::new();

    let result = client.dashboard_kpis(&session).await;
    assert!(matches!(
        &result,
        Err(LoadError::Request(unified_client::ClientError::Http { status: 500, .. }))
    ));
    // Indistinguishable from the no-token case once collapsed.
    assert_eq!(result.unwrap_or_default(), DashboardKpis::default());
}

#[tokio::test]
async fn unauthorized_invalidates_the_session() {
    let (addr, backend, _server) = spawn_backend().await;
    backend.kpis_status.store(401, Ordering::SeqCst);

    let client = client_for(addr);
    let session = Session::new();

    let result = client.dashboard_kpis(&session).await;
    assert_eq!(result.unwrap_or_default(), DashboardKpis::default());
    assert_eq!(session.token().await, None);

    // Recovery: the next load logs in again and succeeds.
    backend.kpis_status.store(200, Ordering::SeqCst);
    let kpis = client.dashboard_kpis(&session).await.unwrap();
    assert_eq!(kpis, sample_kpis());
    assert_eq!(backend.login_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn login_happens_at_most_once_while_cached() {
    let (addr, backend, _server) = spawn_backend().await;
    let client = client_for(addr);
    let session = Session::new();

    for _ in 0..3 {
        client.sync_status(&session).await.unwrap();
    }
    for _ in 0..2 {
        assert!(session.authenticate(&client).await.is_some());
    }
    assert_eq!(backend.login_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn kpis_payload_is_returned_verbatim() {
    let (addr, _backend, _server) = spawn_backend().await;
    let client = client_for(addr);
    let session = Session::new();

    let kpis = client.dashboard_kpis(&session).await.unwrap();
    assert_eq!(kpis, sample_kpis());
}

#[tokio::test]
async fn products_query_is_url_encoded() {
    let (addr, backend, _server) = spawn_backend().await;
    let client = client_for(addr);
    let session = Session::new();

    let rows = client.products(&session, Some("ABC")).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        backend.last_products_query.lock().unwrap().as_deref(),
        Some("sku=ABC")
    );

    client.products(&session, Some("AB C/1")).await.unwrap();
    assert_eq!(
        backend.last_products_query.lock().unwrap().as_deref(),
        Some("sku=AB%20C%2F1")
    );

    client.products(&session, None).await.unwrap();
    assert_eq!(*backend.last_products_query.lock().unwrap(), None);
}

#[tokio::test]
async fn network_failure_collapses_to_empty_list() {
    let (addr, _backend, server) = spawn_backend().await;
    let client = client_for(addr);
    let session = Session::new();

    // Cache a valid token, then take the backend away.
    assert!(session.authenticate(&client).await.is_some());
    server.abort();
    let _ = server.await;

    let result = client.products(&session, Some("ABC")).await;
    assert!(matches!(
        &result,
        Err(LoadError::Request(unified_client::ClientError::Transport(_)))
    ));
    assert_eq!(result.unwrap_or_default(), Vec::<Product>::new());
}

#[tokio::test]
async fn concurrent_loaders_degrade_independently() {
    let (addr, backend, _server) = spawn_backend().await;
    backend.kpis_status.store(500, Ordering::SeqCst);

    let client = client_for(addr);
    let session = Session::new();

    let (kpis, sync) = tokio::join!(
        client.dashboard_kpis(&session),
        client.sync_status(&session)
    );

    assert_eq!(kpis.unwrap_or_default(), DashboardKpis::default());
    assert_eq!(sync.unwrap(), sample_sync_status());
}
