//! # Opinar CLI
//!
//! Command-line interface for the feedback-form service.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! opinar serve --listen 0.0.0.0:8080 --db opinar.db
//!
//! # Start with the demo account and sample form
//! opinar serve --seed-demo
//!
//! # Generate a QR code PNG without running the server
//! opinar qr https://example.com/form/DEMO123 --output code.png
//!
//! # Embed a logo in the center of the code
//! opinar qr https://example.com/form/DEMO123 --logo logo.png
//! ```

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use opinar::{OpinarError, ServerConfig, notify, qr, server};

/// Opinar - feedback form service
#[derive(Parser, Debug)]
#[command(name = "opinar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Path to the SQLite database file
        #[arg(long, default_value = "opinar.db")]
        db: String,

        /// Public base URL used to build shareable form links
        #[arg(long, default_value = "http://localhost:8080")]
        public_url: String,

        /// Webhook URL for new-response notifications
        #[arg(long)]
        notify_webhook: Option<String>,

        /// Create the demo account and sample form on startup
        #[arg(long)]
        seed_demo: bool,
    },

    /// Generate a QR code PNG for a URL
    Qr {
        /// URL to encode
        url: String,

        /// Output PNG file
        #[arg(long, value_name = "FILE", default_value = "qrcode.png")]
        output: PathBuf,

        /// Image file pasted over the center of the code
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), OpinarError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            db,
            public_url,
            notify_webhook,
            seed_demo,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                db_path: db,
                public_url,
            };
            server::serve(config, notify::from_webhook(notify_webhook), seed_demo).await
        }

        Commands::Qr { url, output, logo } => {
            // Wrap a logo file in the same data-URI form the HTTP API takes,
            // so the CLI exercises the identical pipeline.
            let logo_data = match logo {
                Some(path) => {
                    let bytes = std::fs::read(&path)?;
                    let mime = mime_guess::from_path(&path).first_or_octet_stream();
                    Some(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)))
                }
                None => None,
            };

            let data_uri = qr::generate(&url, logo_data.as_deref())?;
            let payload = data_uri
                .strip_prefix(qr::DATA_URI_PREFIX)
                .unwrap_or(&data_uri);
            let png = STANDARD
                .decode(payload)
                .map_err(|e| OpinarError::Image(format!("Base64 decode failed: {}", e)))?;

            std::fs::write(&output, png)?;
            println!("Saved to {}", output.display());
            Ok(())
        }
    }
}
