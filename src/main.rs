use std::sync::Arc;

mod app;
mod config;
mod core;
mod utils;

#[tokio::main]
async fn main() {
    // Optional .env loading (equivalent of `#[dotenvy::load(path = "./.env", required = false)]`).
    let _ = dotenvy::from_path("./.env");
    let config = config::Config::init().expect("Failed to initialize configuration");
    app::common::init_logging(&config);

    let emby_paths: Vec<String> = std::env::args().skip(1).collect();
    if emby_paths.is_empty() {
        tracing::error!("Usage: emby2openlist <emby path>...");
        return;
    }

    let client = core::openlist::OpenlistClient::from_config(&config);
    let translator = core::path::Translator::from_config(&config, Arc::new(client));

    for emby_path in emby_paths {
        let translation = translator.translate(&emby_path).await;
        let range = translation.range.evaluate().await;
        if let Err(e) = &range {
            tracing::warn!("Failed to enumerate storage roots for '{}': {e}", translation.path);
        }
        print!("{}", app::common::render_translation(&emby_path, &translation, &range));
    }
}
