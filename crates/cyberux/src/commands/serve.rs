//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use cyberux_build::url_path;
use tower_http::services::ServeDir;

use crate::config::load_config;

/// Run the serve command.
///
/// Serves the project root rather than the build directory: rewritten asset URLs
/// (`build/assets/...`) are relative to the root.
pub async fn run(config_path: &Path, port: u16, dir: PathBuf, open_browser: bool) -> Result<()> {
    let config = load_config(config_path)?.to_build_config(&dir);
    let page = config.html_output();

    if !page.exists() {
        anyhow::bail!(
            "Build not found: {}. Run 'cyberux build' first.",
            page.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let relative = page.strip_prefix(&dir).unwrap_or(&page);
    let url = format!("http://{}/{}", addr, url_path(relative));
    tracing::info!("Serving {} at {}", dir.display(), url);

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Open browser
    if open_browser {
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;

    Ok(())
}
