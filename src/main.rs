use std::path::Path;
use std::sync::Arc;

use dotenv::dotenv;
use parking_lot::Mutex;

mod audit;
mod channels;
mod commands;
mod config;
mod models;
mod store;

use audit::AuditLog;
use config::Config;
use store::RegistryStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let data_dir = Path::new(&config.data_dir);

    log::info!("Loading registry snapshots from {}", config.data_dir);
    // A malformed snapshot is an operator problem; refuse to start on it
    let store = RegistryStore::load(data_dir).expect("Failed to load registry snapshots");
    log::info!(
        "Loaded {} characters and {} academy members",
        store.character_count(),
        store.person_count()
    );

    let store = Arc::new(Mutex::new(store));
    let audit = Arc::new(AuditLog::new(data_dir));

    log::info!("Starting Discord listener");
    if let Err(e) = channels::discord::start_listener(config, store, audit).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
