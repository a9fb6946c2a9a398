use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use epd_codec::{DisplayMode, HardwareTarget, RenderConfig, Rotation};
use inkframe::api;
use inkframe::models::{AppConfig, ImmichSettings};
use inkframe::server;
use inkframe::services::{decoder, ConfigStore, ConfigWatcher, ImmichClient, SleepPlan};

const DEFAULT_CONFIG_FILE: &str = "/config/config.yaml";
const DEFAULT_PHOTO_DIR: &str = "/photos";

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(about = "Photo frame server for 7-color e-paper displays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Convert an image file to panel codes without a server
    Convert {
        /// Input image (JPEG, PNG, BMP, GIF or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output C array text file
        #[arg(short, long)]
        output: PathBuf,

        /// Panel rotation in degrees: 0, 90, 180 or 270
        #[arg(long, default_value_t = 0)]
        rotation: u16,

        /// "fit" (letterbox) or "fill" (crop)
        #[arg(long, default_value = "fill")]
        mode: String,

        /// Saturation factor
        #[arg(long, default_value_t = 1.0)]
        saturation: f32,

        /// Contrast factor
        #[arg(long, default_value_t = 1.0)]
        contrast: f32,

        /// Dithering strength, 0.0 to 1.0
        #[arg(long, default_value_t = 1.0)]
        strength: f32,

        /// Panel type: "acep7" or "spectra6"
        #[arg(long, default_value = "acep7")]
        panel: String,

        /// Panel width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Panel height in pixels
        #[arg(long, default_value_t = 480)]
        height: u32,
    },
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "inkframe API",
        description = "Photo frame server for 7-color e-paper displays",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_download,
        api::handle_sleep,
        api::handle_get_settings,
        api::handle_update_settings,
    ),
    components(schemas(
        ImmichSettings,
        SleepPlan,
        api::SettingsResponse,
        api::SettingsUpdate,
    )),
    tags(
        (name = "Frame", description = "Endpoints polled by the photo frame"),
        (name = "Settings", description = "Album and rendering settings")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            rotation,
            mode,
            saturation,
            contrast,
            strength,
            panel,
            width,
            height,
        }) => {
            init_tracing("inkframe=info,epd_codec=info", false);
            let config = RenderConfig::new(width, height)
                .rotation(Rotation::try_from(rotation)?)
                .mode(DisplayMode::from_str(&mode)?)
                .saturation(saturation)
                .contrast(contrast)
                .strength(strength)
                .hardware(HardwareTarget::from_str(&panel)?);
            run_convert_command(&input, &output, &config)
        }
        Some(Commands::InitConfig { force }) => {
            init_tracing("inkframe=info", false);
            run_init_config_command(&config_file(), force)
        }
        Some(Commands::Serve) | None => run_server().await,
    }
}

fn init_tracing(default_filter: &str, with_time: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);
    if with_time {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
    }
}

fn config_file() -> PathBuf {
    std::env::var("CONFIG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Convert an image file directly (no server needed)
fn run_convert_command(input: &Path, output: &Path, config: &RenderConfig) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let decoded = decoder::decode(&bytes, extension.as_deref())?;
    let packed = epd_codec::convert(&decoded.pixels, decoded.orientation, config)?;

    std::fs::write(output, packed.to_c_array())
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Wrote {} ({} bytes of panel codes, {}x{} {})",
        output.display(),
        packed.len(),
        config.width,
        config.height,
        config.hardware
    );
    Ok(())
}

fn run_init_config_command(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("{} already exists (use --force to overwrite)", path.display());
        return Ok(());
    }
    AppConfig::default().save(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

async fn run_server() -> anyhow::Result<()> {
    init_tracing("inkframe=debug,epd_codec=info,tower_http=debug", true);

    let config_path = config_file();
    let photo_dir = std::env::var("IMMICH_PHOTO_DEST")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PHOTO_DIR));
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let api_key = std::env::var("IMMICH_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("IMMICH_API_KEY is not set, photo server requests will be rejected");
        String::new()
    });

    std::fs::create_dir_all(&photo_dir)
        .with_context(|| format!("failed to create {}", photo_dir.display()))?;

    let store = Arc::new(ConfigStore::open(&config_path));
    let _watcher = ConfigWatcher::new(store.clone());
    let albums = Arc::new(ImmichClient::new(&api_key)?);

    tracing::info!(
        config = %config_path.display(),
        photos = %photo_dir.display(),
        "Paths configured"
    );

    let state = server::create_app_state(store, albums, &photo_dir);

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "inkframe server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
