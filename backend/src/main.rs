mod app_state;
mod cli;
mod config;
mod render;
mod services;
mod store;
#[cfg(test)]
mod test_support;
mod translation;

use crate::app_state::AppState;
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clap::Parser;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = cli.load_config()?;

    match cli.command {
        None => serve(config, false).await,
        Some(Command::Serve { no_browser }) => serve(config, no_browser).await,
        Some(Command::CheckConfig) => cli::check_config(&config),
        Some(Command::Translate { name }) => cli::translate(&config, &name).await,
        Some(Command::Render {
            name,
            translate,
            out,
        }) => cli::render(&config, &name, translate, &out).await,
    }
}

async fn serve(config: AppConfig, no_browser: bool) -> anyhow::Result<()> {
    let url = config.bind_url();
    let bind = (config.server.host.clone(), config.server.port);
    let json_limit = config.server.json_limit_bytes;
    let open_browser = config.server.open_browser && !no_browser;

    let state = AppState::from_config(config)?;
    info!("Guest database at {}", state.store.path().display());
    info!("Invitation template at {}", state.renderer.template_path().display());
    if !state.renderer.template_path().exists() {
        warn!("Invitation template is missing; card downloads will fail until it is added");
    }
    if !state.renderer.has_embedded_font() {
        warn!("No Gujarati font embedded; stamped names fall back to Helvetica");
    }

    if open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .service(services::guests::configure_routes())
            .service(services::invitations::configure_routes())
            .service(services::translate::configure_routes())
            .service(services::sharing::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}
