use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::item::{GridRow, ItemRecord, NewItem};
use crate::notice::Notice;
use crate::session::Session;

pub struct AppState {
    session: Session,
}

#[derive(Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub rows: Vec<GridRow>,
}

#[derive(Serialize)]
struct ItemsResponse<'a> {
    columns: &'a [String],
    rows: &'a [ItemRecord],
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct NoticeResponse {
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct PageData<'a> {
    columns: &'a [String],
    data_file: String,
}

pub fn router(session: Session) -> Router {
    let app_state = Arc::new(AppState { session });

    Router::new()
        .route("/", get(serve_page))
        .route("/api/items", get(get_items))
        .route("/api/save", post(save_changes))
        .route("/api/add", post(add_item))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(config.data_path.clone(), config.labels.clone());
    let app = router(session);

    let listener = TcpListener::bind(config.bind_addr).await?;
    log::info!(
        "Listening on http://{} (data file: {})",
        config.bind_addr,
        config.data_path.display()
    );
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = &state.session;
    let data = PageData {
        columns: session.labels().as_slice(),
        data_file: session.path().display().to_string(),
    };
    // `<` is escaped so a file name cannot close the script tag
    let data_json = serde_json::to_string(&data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c");

    let template = include_str!("./static/items.html");
    Html(template.replace(
        "</head>",
        &format!("    <script>const PAGE_DATA = {};</script>\n</head>", data_json),
    ))
}

async fn get_items(State(state): State<Arc<AppState>>) -> Response {
    let session = &state.session;
    let outcome = session.view();

    Json(ItemsResponse {
        columns: session.labels().as_slice(),
        rows: outcome.table.rows(),
        notices: outcome.notice.into_iter().collect(),
    })
    .into_response()
}

async fn save_changes(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SaveRequest>,
) -> impl IntoResponse {
    let notice = state.session.save_grid(payload.rows);
    Json(NoticeResponse {
        notices: vec![notice],
    })
}

async fn add_item(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewItem>,
) -> impl IntoResponse {
    Json(NoticeResponse {
        notices: state.session.add_item(form),
    })
}
