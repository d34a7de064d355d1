use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use std::env;
use std::fs;
use std::io;

const LOG_FILE: &str = "log.txt";

fn default_filter(log_level: &str, enable_wgpu_logging: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(log_level);
        if enable_wgpu_logging {
            for directive in ["wgpu=debug", "wgpu_core=debug", "wgpu_hal=debug", "naga=debug"] {
                if let Ok(d) = directive.parse() {
                    filter = filter.add_directive(d);
                }
            }
        }
        if let Ok(d) = "jar_sprite=debug".parse() {
            filter = filter.add_directive(d);
        }
        filter
    })
}

/// Console-only logging for command line tools. Leaves the app's session log alone.
pub fn init_console_logging() {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());

    let init = tracing_subscriber::registry()
        .with(default_filter(&log_level, false))
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .try_init();

    if let Err(e) = init {
        eprintln!("Warning: Logging already initialized: {}", e);
    }
}

/// Initialize console + session file logging.
///
/// `RUST_LOG` wins when set. Otherwise the level defaults to `info` with this
/// crate at `debug`, and `WGPU_LOG=1` opts into verbose graphics backend output.
pub fn init_logging() {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let enable_wgpu_logging = env::var("WGPU_LOG").map(|v| v == "1").unwrap_or(false);
    let enable_backtrace = env::var("RUST_BACKTRACE").map(|v| v == "1").unwrap_or(false);

    // Session-based log file, cleaned on startup
    if let Err(e) = fs::remove_file(LOG_FILE) {
        if e.kind() != io::ErrorKind::NotFound {
            eprintln!("Warning: Failed to remove existing {}: {}", LOG_FILE, e);
        }
    }
    let log_file = match fs::File::create(LOG_FILE) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: File logging disabled, cannot create {}: {}", LOG_FILE, e);
            None
        }
    };
    let file_logging = log_file.is_some();

    let env_filter = default_filter(&log_level, enable_wgpu_logging);

    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false) // No ANSI codes in file
    });

    let init = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
        )
        .with(file_layer)
        .try_init();

    if let Err(e) = init {
        eprintln!("Warning: Logging already initialized: {}", e);
        return;
    }

    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("Panic occurred: {}", panic_info);

        if let Some(location) = panic_info.location() {
            tracing::error!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        if enable_backtrace {
            tracing::error!("Backtrace:\n{:?}", std::backtrace::Backtrace::capture());
        }
    }));

    tracing::info!("Logging initialized with level: {}", log_level);
    tracing::info!("File logging enabled: {}", file_logging);
    tracing::info!("WGPU logging enabled: {}", enable_wgpu_logging);
}

/// Log the outcome of a wgpu call and hand the result back unchanged.
pub fn handle_wgpu_result<T, E: std::fmt::Display>(result: Result<T, E>, operation: &str) -> Result<T, E> {
    match &result {
        Ok(_) => {
            tracing::debug!("WGPU operation '{}' completed successfully", operation);
        }
        Err(e) => {
            tracing::error!("WGPU operation '{}' failed: {}", operation, e);
        }
    }
    result
}

pub fn log_adapter_info(adapter: &wgpu::Adapter) {
    let info = adapter.get_info();
    tracing::info!("=== WGPU Adapter Information ===");
    tracing::info!("Name: {}", info.name);
    tracing::info!("Backend: {:?}", info.backend);
    tracing::info!("Device Type: {:?}", info.device_type);
    tracing::info!("Driver: {} ({})", info.driver, info.driver_info);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn console_logging_leaves_session_log_alone() {
        let before = fs::read(LOG_FILE).ok();
        init_console_logging();
        tracing::warn!("console only");
        assert_eq!(fs::read(LOG_FILE).ok(), before);
        assert_eq!(Path::new(LOG_FILE).exists(), before.is_some());
    }
}
