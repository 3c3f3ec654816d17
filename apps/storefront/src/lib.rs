//! # Santos Storefront Library
//!
//! State container, commands and the invoke bridge behind the Santos web
//! storefront.
//!
//! ## Module Organization
//! ```text
//! santos_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── bridge.rs       ◄─── Line-delimited JSON invoke loop
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState bundle
//! │   ├── storefront.rs ◄─ Cart, wishlist, recently viewed
//! │   ├── checkout.rs ◄─── Checkout wizard
//! │   ├── session.rs  ◄─── Signed-in shopper
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── One file per feature area
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod bridge;
pub mod commands;
pub mod error;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{AppState, ConfigState};

/// Runs the storefront service until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber on stderr, RUST_LOG overrides                  │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • SANTOS_* variables, platform data directory                       │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • Wishlist file store, SQLite catalog + migrations                  │
/// │     • House catalog on first run, saved wishlist restored               │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • invoke requests on stdin, responses on stdout                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Santos storefront");

    let config = ConfigState::from_env()?;
    info!(
        data_dir = %config.data_dir.display(),
        db_path = %config.database_path.display(),
        "Configuration loaded"
    );

    let app = AppState::open(config).await?;
    info!("State initialized; serving invoke requests on stdin");

    bridge::serve(&app, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    app.db.get().close().await;
    info!("Santos storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=santos_storefront=trace` - Trace the app crate only
/// - Default: INFO, debug for santos crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,santos_core=debug,santos_db=debug,santos_storefront=debug,sqlx=warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
