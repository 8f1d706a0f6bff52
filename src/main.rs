//! MedLife Clinic server entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use medlife_clinic::api::{create_router, AppState};
use medlife_clinic::clinic;
use medlife_clinic::config::Config;
use medlife_clinic::metrics;
use medlife_clinic::reveal::{self, landing, ControllerConfig, ViewportRevealController};
use medlife_clinic::utils::shutdown_signal;
use medlife_clinic::ClinicError;

/// MedLife Clinic website server.
#[derive(Parser, Debug)]
#[command(name = "medlife-clinic")]
#[command(about = "Landing page and form API for the MedLife Clinic website")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the service catalog as JSON.
    Services,

    /// Print the doctor listing as JSON.
    Doctors,

    /// Scroll through the landing page headlessly and print the stat counters.
    Simulate {
        /// Viewport height in pixels.
        #[arg(long, default_value = "800")]
        height: f64,

        /// Pixels scrolled per step.
        #[arg(long, default_value = "200")]
        step: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("medlife_clinic=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Services) => print_json(clinic::services()),
        Some(Command::Doctors) => print_json(clinic::doctors()),
        Some(Command::Simulate { height, step }) => cmd_simulate(height, step).await,
        None => cmd_serve(args.port).await,
    }
}

fn load_config() -> Result<Config, ClinicError> {
    let config = Config::load()?;
    config.validate().map_err(ClinicError::InvalidConfig)?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("MEDLIFE CLINIC - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    print!("Checking landing page... ");
    if config.index_path().is_file() {
        println!("OK");
    } else {
        println!("MISSING");
        println!("  Expected: {}", config.index_path().display());
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Static Dir: {}", config.static_dir.display());
    println!("  Contact Delay: {}ms", config.contact_delay_ms);
    println!("  Appointment Delay: {}ms", config.appointment_delay_ms);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
async fn cmd_serve(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = load_config()?;
    if let Some(port) = port {
        config.port = port;
    }

    if !config.index_path().is_file() {
        warn!(path = %config.index_path().display(), "Landing page not found");
    }

    let mut app_state = AppState::new(config.clone());
    match metrics::install() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!(error = %e, "Metrics recorder unavailable"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("MedLife Clinic server is running on port {}", config.port);
    info!("Visit: http://localhost:{}", config.port);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Scroll the landing page top to bottom and report what was revealed.
async fn cmd_simulate(height: f64, step: f64) -> anyhow::Result<()> {
    let mut doc = landing::landing_page();
    let mut controller =
        ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

    let bottom = landing::page_height(&doc);
    let mut viewport = reveal::Viewport::new(landing::PAGE_WIDTH, height);
    let step = step.max(1.0);

    loop {
        let revealed = controller.scroll_to(&mut doc, &viewport);
        if revealed > 0 {
            info!(scroll_y = viewport.scroll_y, revealed, "Elements revealed");
        }
        if viewport.scroll_y + height >= bottom {
            break;
        }
        viewport = viewport.scrolled_to(viewport.scroll_y + step);
    }

    let ticks = reveal::drive(&mut controller, &mut doc).await;

    let revealed = controller.records().filter(|r| r.revealed).count();
    println!("Revealed {}/{} elements", revealed, controller.watcher().len());
    for ((label, _), id) in landing::STATS.iter().zip(doc.stat_widgets()) {
        let text = doc.get(id).map(|e| e.text.as_str()).unwrap_or("");
        println!("  {:<22} {}", label, text);
    }
    println!("Animations finished after {} ticks", ticks);

    Ok(())
}
