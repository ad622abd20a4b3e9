use api_remote::clipboard::SystemClipboard;
use api_remote::config::AppConfig;
use api_remote::config_manager::{load_settings, Settings};
use api_remote::console::{self, ConsoleSurface};
use api_remote::location::PageLocation;
use api_remote::logging::init_subscriber;
use api_remote::poller::start_log_polling;
use api_remote::relay::HttpRelay;
use api_remote::slots::SLOT_COUNT;
use api_remote::{RemoteController, Role, Surface};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_subscriber();

    info!("Starting API Remote...");

    let config = match AppConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("\nERROR: {}. Check RELAY_URL and POLL_INTERVAL_MS.", e);
            return;
        }
    };

    let settings = match load_settings(config.settings_file.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring unreadable settings file: {}", e);
            Settings::default()
        }
    };

    let relay = match HttpRelay::build_client().and_then(|client| HttpRelay::new(client, &config.relay_url)) {
        Ok(relay) => relay,
        Err(e) => {
            error!("Failed to set up relay client: {}", e);
            return;
        }
    };

    let surface = Arc::new(ConsoleSurface::new());
    prefill_endpoints(surface.as_ref(), &settings);

    let controller = Arc::new(
        RemoteController::new(
            surface.clone(),
            Arc::new(relay),
            Arc::new(SystemClipboard::new(config.clipboard_command.as_deref())),
            PageLocation::from_url(&config.relay_url),
        )
        .with_default_headers(settings.default_headers.clone()),
    );
    controller.init();

    print_remote_status(&config, surface.as_ref());

    start_log_polling(Arc::clone(&controller), config.poll_interval);

    console::run(controller, surface).await;

    info!("API Remote shutting down.");
}

fn prefill_endpoints(surface: &dyn Surface, settings: &Settings) {
    for (i, endpoint) in settings.send_endpoints.iter().take(SLOT_COUNT).enumerate() {
        surface.set_value(Role::SendEndpoint(i), endpoint);
    }
    for (i, endpoint) in settings.receive_endpoints.iter().take(SLOT_COUNT).enumerate() {
        surface.set_value(Role::ReceiveEndpoint(i), endpoint);
    }
}

fn print_remote_status(config: &AppConfig, surface: &dyn Surface) {
    println!("\nAPI Remote is talking to the relay at {}", config.relay_url);
    println!("Webhooks received by the relay at:");
    for i in 0..SLOT_COUNT {
        println!("  {}", surface.text(Role::FullUrl(i)).unwrap_or_default());
    }
    println!("Relay logs are polled every {:?}.", config.poll_interval);
}
