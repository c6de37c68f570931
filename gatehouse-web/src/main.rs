//! Gatehouse Web Server
//!
//! A cookie-session sign-in gate in front of the Gatehouse identity
//! directory.

use clap::Parser;
use gatehouse_core::{init_logging, LoggingConfig};
use gatehouse_web::server::GatehouseServerBuilder;
use gatehouse_web::WebConfig;

/// Gatehouse Web Server - session-based sign-in gate
#[derive(Parser)]
#[command(name = "gatehouse-web")]
#[command(about = "A session-based sign-in gate")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable development mode (seeds demo identities)
    #[arg(long)]
    dev: bool,

    /// Database URL for the identity directory
    #[arg(long)]
    database_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging first
    let logging = LoggingConfig {
        level: format!(
            "gatehouse_web={},gatehouse_core={},tower_http=debug",
            args.log_level, args.log_level
        ),
        ..LoggingConfig::default()
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    // Create web configuration, overriding with command line arguments
    let mut config = WebConfig::from_env();
    config.host = args.host;
    config.port = args.port;
    config.dev_mode = args.dev;
    if args.database_url.is_some() {
        config.database_url = args.database_url;
    }

    println!("🚀 Starting Gatehouse Web Server");
    println!("📍 Server: http://{}:{}", config.host, config.port);
    println!("🔧 Development mode: {}", config.dev_mode);

    if let Some(database_url) = &config.database_url {
        println!("🗄️  Database: {}", database_url);
    }

    if config.session_secret.is_none() {
        println!("⚠️  GATEHOUSE_SESSION_SECRET is not set: sessions will not survive a restart.");
    }

    // Build and start the server
    let mut builder = GatehouseServerBuilder::new()
        .host(config.host.clone())
        .port(config.port)
        .dev_mode(config.dev_mode);
    if let Some(database_url) = config.database_url.clone() {
        builder = builder.database_url(database_url);
    }
    if let Some(session_secret) = config.session_secret.clone() {
        builder = builder.session_secret(session_secret);
    }

    let server = match builder.build().await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    // Start the server (this will block until shutdown)
    if let Err(e) = server.start().await {
        eprintln!("❌ Server failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        use clap::Parser;

        // Test default values
        let args = Args::parse_from(["gatehouse-web"]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 8080);
        assert!(!args.dev);

        // Test custom values
        let args = Args::parse_from([
            "gatehouse-web",
            "--host",
            "0.0.0.0",
            "--port",
            "3000",
            "--dev",
        ]);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 3000);
        assert!(args.dev);
    }
}
