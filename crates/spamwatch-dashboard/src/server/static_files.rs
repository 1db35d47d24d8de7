use axum::{
    http::{header, Uri},
    response::{Html, IntoResponse, Response},
};
use rust_embed::{Embed, EmbeddedFile};

/// Dashboard page and anything bundled next to it
#[derive(Embed)]
#[folder = "assets"]
struct DashboardAssets;

const INDEX: &str = "index.html";

/// Serve a bundled asset, or the dashboard page for any other path
pub async fn serve_static(uri: Uri) -> Response {
    let requested = match uri.path().trim_start_matches('/') {
        "" => INDEX,
        path => path,
    };

    let found = DashboardAssets::get(requested)
        .map(|file| (requested, file))
        .or_else(|| DashboardAssets::get(INDEX).map(|file| (INDEX, file)));

    match found {
        Some((path, file)) => asset_response(path, file),
        None => Html(FALLBACK_HTML).into_response(),
    }
}

fn asset_response(path: &str, file: EmbeddedFile) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.as_ref())], file.data).into_response()
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>SpamWatch</title>
</head>
<body>
    <h1>SpamWatch</h1>
    <p>The dashboard UI is not bundled in this build. The JSON endpoints are
    available under <code>/api/classify</code>, <code>/api/examples</code>
    and <code>/api/health</code>.</p>
</body>
</html>
"#;
