use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the diagnostic subscriber.
///
/// Output goes to stderr so it never interleaves with the log view on stdout.
/// `APP_ENV=production` switches to JSON lines; `RUST_LOG` overrides the filter.
pub fn init_subscriber() {
    let is_production = std::env::var("APP_ENV").as_deref() == Ok("production");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api_remote=info,reqwest=warn".into());

    let subscriber = tracing_subscriber::registry().with(filter);

    if is_production {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
