use tracing_subscriber::filter::{EnvFilter, LevelFilter};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    if let Err(e) = game_core::run() {
        tracing::error!("game error: {}", e);
    }
}

/// Filter from a `RUST_LOG` value, `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or(""))
}
