mod common;
mod config;
mod muse;
mod storage;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use muse::MuseClient;
use tokio::sync::mpsc;
use ui::StudioApp;

#[derive(Parser)]
#[command(
    name = "aura_studio",
    version,
    about = "Aura design studio desktop client"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Path to the gallery database
    #[arg(long, default_value = "data/gallery.db", value_name = "FILE")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Muse worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Muse worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy Muse worker (Chạy ngầm)
    let api_key = std::env::var("GEMINI_API_KEY").ok();
    let muse_enabled = match MuseClient::new(&app_config.muse, api_key, event_tx, cmd_rx) {
        Ok(client) => {
            tokio::spawn(async move {
                client.run().await;
            });
            true
        }
        Err(err) => {
            // Thiếu credential: gallery vẫn chạy, chỉ tắt trợ lý Muse.
            log::error!("Muse assistant disabled: {err}");
            false
        }
    };

    let gallery = open_gallery(&cli.db);

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let mut gallery = Some(gallery);

    eframe::run_native(
        "Aura Studio",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("StudioApp should only be initialized once");
            let gallery = gallery
                .take()
                .expect("StudioApp should only be initialized once");

            log::info!(
                "Client started (Muse {})",
                if muse_enabled { "enabled" } else { "disabled" }
            );

            Ok(Box::new(StudioApp::new(
                cc,
                cmd_tx.clone(),
                event_receiver,
                gallery,
                muse_enabled,
            )))
        }),
    )
}

fn open_gallery(path: &str) -> Option<storage::GalleryDatabase> {
    if let Err(err) = storage::ensure_data_dir(path) {
        log::warn!("Failed to create data directory: {err}");
    }

    match storage::GalleryDatabase::with_path(path) {
        Ok(db) => Some(db),
        Err(err) => {
            log::warn!("Gallery database unavailable, falling back to demo data: {err}");
            None
        }
    }
}
