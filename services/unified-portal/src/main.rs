//! Unified ERP Portal
//!
//! Server-rendered operations dashboard for the Unified ERP backend:
//! product catalog, inventory, receiving, sales orders and third-party
//! sync status. Every page loads its data through the unified-client
//! fallback policy and renders either the real payload or the zero/empty
//! default — never an error screen. Live badges reflect the push channels
//! owned by this process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use unified_client::{ApiClient, ClientConfig, Session};
use unified_live::{ConnectionState, LiveStatus};
use unified_types::{
    DashboardKpis, InboundShipment, Product, Revision, SalesOrder, StockRow, SyncStatus,
    WooConnection, WooSyncStatus,
};

/// Unified ERP Portal - server-rendered operations dashboard
#[derive(Parser, Debug)]
#[command(name = "unified-portal")]
#[command(about = "Unified ERP operations dashboard")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "UNIFIED_PORTAL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind to
    #[arg(short, long, env = "UNIFIED_PORTAL_PORT", default_value = "3000")]
    port: u16,

    /// Backend API base URL
    #[arg(long, env = "UNIFIED_API_BASE_URL", default_value = "http://localhost:8080")]
    api_base_url: String,
}

/// One live indicator per page section that advertises liveness.
///
/// Opened at startup, released when the process exits. Each indicator owns
/// its channel exclusively; a dead channel stays "Offline" until restart.
struct LiveChannels {
    dashboard: LiveStatus,
    sync: LiveStatus,
    inventory: LiveStatus,
    receiving: LiveStatus,
}

impl LiveChannels {
    fn open(config: &ClientConfig) -> Self {
        Self {
            dashboard: LiveStatus::connect(config.ws_url("/api/v1/ws/dashboard")),
            sync: LiveStatus::connect(config.ws_url("/api/v1/ws/sync-status")),
            inventory: LiveStatus::connect(config.ws_url("/api/v1/ws/inventory/1")),
            receiving: LiveStatus::connect(config.ws_url("/api/v1/ws/receiving/1")),
        }
    }
}

/// Application state
struct AppState {
    client: ApiClient,
    session: Session,
    live: LiveChannels,
}

// ============================================================================
// Page Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let (kpis, sync) = tokio::join!(
        state.client.dashboard_kpis(&state.session),
        state.client.sync_status(&state.session),
    );
    let kpis = kpis.unwrap_or_default();
    let sync = sync.unwrap_or_default();
    Html(render_dashboard(&kpis, &sync, state.live.dashboard.state()))
}

async fn products_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let query = params.q.as_deref().filter(|q| !q.trim().is_empty());
    let products = state
        .client
        .products(&state.session, query)
        .await
        .unwrap_or_default();
    Html(render_products(&products, query))
}

async fn product_page(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Html<String> {
    let (product, revisions) = tokio::join!(
        state.client.product(&state.session, id),
        state.client.revisions(&state.session, "pim_product", id),
    );
    let revisions = revisions.unwrap_or_default();
    match product.ok() {
        Some(product) => Html(render_product_detail(&product, &revisions)),
        None => Html(render_not_found()),
    }
}

async fn stock_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let rows = state.client.stock(&state.session).await.unwrap_or_default();
    Html(render_stock(&rows, state.live.inventory.state()))
}

async fn receiving_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let shipments = state
        .client
        .inbound_shipments(&state.session)
        .await
        .unwrap_or_default();
    Html(render_receiving(&shipments, state.live.receiving.state()))
}

async fn sales_orders_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let orders = state
        .client
        .sales_orders(&state.session)
        .await
        .unwrap_or_default();
    Html(render_sales_orders(&orders))
}

async fn woo_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let (status, connections) = tokio::join!(
        state.client.woo_sync_status(&state.session),
        state.client.woo_connections(&state.session),
    );
    let status = status.unwrap_or_default();
    let connections = connections.unwrap_or_default();
    Html(render_woo(&status, &connections, state.live.sync.state()))
}

/// Health check endpoint for this service
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "unified-portal",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ============================================================================
// HTML Rendering
// ============================================================================

const STYLESHEET: &str = r#"
:root {
    --bg: #f4f5f7;
    --surface: #ffffff;
    --border: #e3e5e8;
    --text: #1f2329;
    --text-muted: #6b7280;
    --accent: #2563eb;
    --ok: #10b981;
    --bad: #9ca3af;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    display: grid;
    grid-template-columns: 220px 1fr;
    min-height: 100vh;
}
.sidebar {
    background: var(--surface);
    border-right: 1px solid var(--border);
    padding: 1.25rem 1rem;
}
.brand { display: flex; gap: 0.6rem; align-items: center; margin-bottom: 1.5rem; }
.brand-mark {
    width: 36px; height: 36px; border-radius: 8px;
    background: var(--accent); color: #fff;
    display: grid; place-items: center; font-weight: 700;
}
.brand-title { font-weight: 600; }
.brand-subtitle { font-size: 0.75rem; color: var(--text-muted); }
.nav-item {
    display: block; padding: 0.5rem 0.75rem; border-radius: 6px;
    color: var(--text); text-decoration: none; margin-bottom: 0.25rem;
}
.nav-item.active, .nav-item:hover { background: var(--bg); color: var(--accent); }
.main { padding: 0; }
.topbar {
    background: var(--surface); border-bottom: 1px solid var(--border);
    padding: 0.75rem 1.5rem;
}
.search-input {
    width: 320px; padding: 0.5rem 0.75rem;
    border: 1px solid var(--border); border-radius: 6px;
}
.content { padding: 1.5rem; }
.page-title { font-size: 1.4rem; margin-bottom: 0.25rem; }
.page-subtitle { color: var(--text-muted); margin-bottom: 1.25rem; }
.kpi-grid {
    display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
    gap: 1rem; margin-bottom: 1.5rem;
}
.card {
    background: var(--surface); border: 1px solid var(--border);
    border-radius: 8px; padding: 1rem;
}
.kpi-label { font-size: 0.8rem; color: var(--text-muted); }
.kpi-value { font-size: 1.5rem; font-weight: 600; }
.table-wrap { overflow-x: auto; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.6rem 0.75rem; border-bottom: 1px solid var(--border); }
th { font-size: 0.8rem; color: var(--text-muted); text-transform: uppercase; }
.pill {
    display: inline-block; padding: 0.1rem 0.5rem; border-radius: 999px;
    background: var(--bg); font-size: 0.8rem;
}
.ws { font-size: 0.8rem; font-weight: 600; }
.ws.connected { color: var(--ok); }
.ws.disconnected { color: var(--bad); }
a { color: var(--accent); }
"#;

const NAV_ITEMS: &[(&str, &str)] = &[
    ("/", "Dashboard"),
    ("/products", "PIM"),
    ("/inventory/stock", "Inventory"),
    ("/receiving", "Receiving"),
];

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn live_badge(state: ConnectionState) -> String {
    let class = if state.is_connected() {
        "ws connected"
    } else {
        "ws disconnected"
    };
    format!(r#"<span class="{class}">{}</span>"#, state.label())
}

fn kpi_card(label: &str, value: &str) -> String {
    format!(
        r#"<article class="card kpi">
    <p class="kpi-label">{label}</p>
    <p class="kpi-value">{}</p>
</article>"#,
        escape_html(value)
    )
}

fn pill(text: &str) -> String {
    format!(r#"<span class="pill">{}</span>"#, escape_html(text))
}

fn nav(active: &str) -> String {
    NAV_ITEMS
        .iter()
        .map(|(href, label)| {
            let class = if *href == active {
                "nav-item active"
            } else {
                "nav-item"
            };
            format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn page_shell(title: &str, active: &str, search: Option<&str>, content: &str) -> String {
    let search_value = escape_html(search.unwrap_or_default());
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Unified ERP</title>
    <style>{STYLESHEET}</style>
</head>
<body>
    <aside class="sidebar">
        <div class="brand">
            <div class="brand-mark">UE</div>
            <div>
                <p class="brand-title">Unified ERP</p>
                <p class="brand-subtitle">Tobacco Ops</p>
            </div>
        </div>
        <nav>
        {nav}
        </nav>
    </aside>
    <div class="main">
        <header class="topbar">
            <form class="search-wrap" action="/products" method="get">
                <input class="search-input" name="q" value="{search_value}"
                       placeholder="Search products, lots, shipments...">
            </form>
        </header>
        <div class="content">
{content}
        </div>
    </div>
</body>
</html>"#,
        nav = nav(active),
    )
}

fn render_dashboard(kpis: &DashboardKpis, sync: &SyncStatus, live: ConnectionState) -> String {
    let cards = [
        kpi_card("Products", &kpis.products_total.to_string()),
        kpi_card("Variants", &kpis.variants_total.to_string()),
        kpi_card("Suppliers", &kpis.suppliers_total.to_string()),
        kpi_card("Open POs", &kpis.purchase_orders_open.to_string()),
        kpi_card("Inbound Active", &kpis.inbound_shipments_active.to_string()),
        kpi_card("Low Stock Alerts", &kpis.low_stock_alerts_open.to_string()),
        kpi_card("FIFO Value", &format!("{:.2} SEK", kpis.stock_value_fifo)),
        kpi_card("WAC Value", &format!("{:.2} SEK", kpis.stock_value_wac)),
        kpi_card("Sync Queue Pending", &sync.pending.to_string()),
        kpi_card("Sync Failures", &sync.failed.to_string()),
    ]
    .join("\n");

    let content = format!(
        r#"<section>
<h1 class="page-title">Operations Dashboard</h1>
<p class="page-subtitle">Single control plane for PIM, receiving, inventory and compliance-ready stock flows. {badge}</p>
<div class="kpi-grid">
{cards}
</div>
</section>"#,
        badge = live_badge(live),
    );
    page_shell("Operations Dashboard", "/", None, &content)
}

fn render_products(products: &[Product], query: Option<&str>) -> String {
    let rows = if products.is_empty() {
        r#"<tr><td colspan="6">No products yet. Create products through <code>POST /api/v1/products</code>.</td></tr>"#
            .to_string()
    } else {
        products
            .iter()
            .map(|product| {
                format!(
                    r#"<tr>
    <td><a href="/products/{id}">{id}</a></td>
    <td>{sku}</td>
    <td>{ean}</td>
    <td>{status}</td>
    <td>{product_type}</td>
    <td>{tobacco}</td>
</tr>"#,
                    id = product.id,
                    sku = escape_html(&product.sku),
                    ean = escape_html(product.ean.as_deref().unwrap_or("-")),
                    status = pill(&product.status),
                    product_type = escape_html(&product.product_type),
                    tobacco = if product.is_tobacco { "Yes" } else { "No" },
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"<section>
<h1 class="page-title">PIM Catalog</h1>
<p class="page-subtitle">Central product source of truth with tobacco attributes, pricing and revision history.</p>
<div class="card table-wrap">
<table>
    <thead>
        <tr><th>ID</th><th>SKU</th><th>EAN</th><th>Status</th><th>Type</th><th>Tobacco</th></tr>
    </thead>
    <tbody>
{rows}
    </tbody>
</table>
</div>
</section>"#
    );
    page_shell("PIM Catalog", "/products", query, &content)
}

fn render_product_detail(product: &Product, revisions: &[Revision]) -> String {
    let history = if revisions.is_empty() {
        r#"<tr><td colspan="2">No revisions yet.</td></tr>"#.to_string()
    } else {
        revisions
            .iter()
            .map(|revision| {
                format!(
                    r#"<tr><td>#{}</td><td>{}</td></tr>"#,
                    revision.revision_no,
                    escape_html(&revision.changed_at),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"<section>
<h1 class="page-title">Product {sku}</h1>
<p class="page-subtitle">Tabs baseline: General, Variants, Pricing, Compliance, Media, History.</p>
<div class="card">
    <p><strong>Status:</strong> {status}</p>
    <p><strong>EAN:</strong> {ean}</p>
    <p><strong>Type:</strong> {product_type}</p>
    <p><strong>Tobacco:</strong> {tobacco}</p>
</div>
<div class="card table-wrap">
    <h3>Change History</h3>
    <table>
        <thead>
            <tr><th>Revision</th><th>Changed At</th></tr>
        </thead>
        <tbody>
{history}
        </tbody>
    </table>
</div>
</section>"#,
        sku = escape_html(&product.sku),
        status = escape_html(&product.status),
        ean = escape_html(product.ean.as_deref().unwrap_or("-")),
        product_type = escape_html(&product.product_type),
        tobacco = if product.is_tobacco { "Yes" } else { "No" },
    );
    page_shell("Product", "/products", None, &content)
}

fn render_not_found() -> String {
    let content = r#"<section>
<h1 class="page-title">Product not found</h1>
</section>"#;
    page_shell("Product not found", "/products", None, content)
}

fn render_stock(rows: &[StockRow], live: ConnectionState) -> String {
    let body = if rows.is_empty() {
        r#"<tr><td colspan="6">No stock records yet.</td></tr>"#.to_string()
    } else {
        rows.iter()
            .map(|row| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    row.id,
                    row.location_id,
                    row.variant_id,
                    escape_html(&row.on_hand_qty),
                    escape_html(&row.reserved_qty),
                    escape_html(&row.available_qty),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"<section>
<h1 class="page-title">Inventory Matrix</h1>
<p class="page-subtitle">Real-time stock by location, lot and variant. {badge}</p>
<div class="card table-wrap">
<table>
    <thead>
        <tr><th>ID</th><th>Location</th><th>Variant</th><th>On Hand</th><th>Reserved</th><th>Available</th></tr>
    </thead>
    <tbody>
{body}
    </tbody>
</table>
</div>
</section>"#,
        badge = live_badge(live),
    );
    page_shell("Inventory Matrix", "/inventory/stock", None, &content)
}

fn render_receiving(shipments: &[InboundShipment], live: ConnectionState) -> String {
    let body = if shipments.is_empty() {
        r#"<tr><td colspan="5">No inbound shipments yet.</td></tr>"#.to_string()
    } else {
        shipments
            .iter()
            .map(|shipment| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>Use API to scan/start/confirm</td></tr>"#,
                    shipment.id,
                    shipment.supplier_id,
                    escape_html(&shipment.source_type),
                    pill(&shipment.status),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"<section>
<h1 class="page-title">Receiving Workstation</h1>
<p class="page-subtitle">Tablet-friendly inbound flow for scan, discrepancy logging and receipt confirmation. {badge}</p>
<div class="card table-wrap">
<table>
    <thead>
        <tr><th>Shipment</th><th>Supplier</th><th>Source</th><th>Status</th><th>Next Action</th></tr>
    </thead>
    <tbody>
{body}
    </tbody>
</table>
</div>
</section>"#,
        badge = live_badge(live),
    );
    page_shell("Receiving Workstation", "/receiving", None, &content)
}

fn render_sales_orders(orders: &[SalesOrder]) -> String {
    let body = if orders.is_empty() {
        r#"<tr><td colspan="6">No sales orders yet.</td></tr>"#.to_string()
    } else {
        orders
            .iter()
            .map(|order| {
                let customer = order
                    .customer_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    order.id,
                    escape_html(&order.order_number),
                    escape_html(&order.channel_type),
                    pill(&order.status),
                    customer,
                    escape_html(&order.total),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"<section>
<h1 class="page-title">Sales Orders</h1>
<p class="page-subtitle">Unified order lifecycle across web, wholesale and internal channels.</p>
<div class="card table-wrap">
<table>
    <thead>
        <tr><th>ID</th><th>Order No</th><th>Channel</th><th>Status</th><th>Customer</th><th>Total</th></tr>
    </thead>
    <tbody>
{body}
    </tbody>
</table>
</div>
</section>"#
    );
    page_shell("Sales Orders", "/sales/orders", None, &content)
}

fn render_woo(status: &WooSyncStatus, connections: &[WooConnection], live: ConnectionState) -> String {
    let cards = [
        kpi_card("Queue Pending", &status.queue_pending.to_string()),
        kpi_card("Queue Failed", &status.queue_failed.to_string()),
        kpi_card("Queue Done", &status.queue_done.to_string()),
        kpi_card("Webhooks Processed", &status.webhooks_processed.to_string()),
    ]
    .join("\n");

    let body = if connections.is_empty() {
        r#"<tr><td colspan="5">No Woo connections configured yet.</td></tr>"#.to_string()
    } else {
        connections
            .iter()
            .map(|connection| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    connection.id,
                    connection.store_channel_id,
                    escape_html(&connection.provider),
                    escape_html(&connection.api_base_url),
                    if connection.active { "Yes" } else { "No" },
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"<section>
<h1 class="page-title">WooCommerce Sync</h1>
<p class="page-subtitle">Webhook ingestion, queue health and store connection control. {badge}</p>
<div class="kpi-grid">
{cards}
</div>
<div class="card table-wrap">
<table>
    <thead>
        <tr><th>ID</th><th>Store Channel</th><th>Provider</th><th>API Base URL</th><th>Active</th></tr>
    </thead>
    <tbody>
{body}
    </tbody>
</table>
</div>
</section>"#,
        badge = live_badge(live),
    );
    page_shell("WooCommerce Sync", "/integration/woo", None, &content)
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse CLI arguments
    let args = Args::parse();
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let config = ClientConfig::new(&args.api_base_url);
    let client = ApiClient::new(config.clone())?;
    let session = Session::new();

    // Best-effort demo login; loaders retry on their own if the backend is
    // not up yet.
    if session.authenticate(&client).await.is_none() {
        warn!("backend not reachable yet; pages will render defaults until it is");
    }

    // Open the push channels the live badges track.
    let live = LiveChannels::open(&config);

    let state = Arc::new(AppState {
        client,
        session,
        live,
    });

    // Build router
    let app = Router::new()
        .route("/", get(dashboard_page))
        .route("/products", get(products_page))
        .route("/products/:id", get(product_page))
        .route("/inventory/stock", get(stock_page))
        .route("/receiving", get(receiving_page))
        .route("/sales/orders", get(sales_orders_page))
        .route("/integration/woo", get(woo_page))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting Unified ERP portal");
    info!("Listening on http://{addr}");
    info!("Backend API: {}", config.base_url);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
