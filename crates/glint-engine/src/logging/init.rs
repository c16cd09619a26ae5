use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

/// Logger configuration.
///
/// Filter precedence: `env_filter`, then the `RUST_LOG` variable, then
/// `default_level`. Filters follow the `env_logger` syntax
/// (e.g. "info", "glint_ui=debug,glint_engine=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
    /// Millisecond timestamps on every record. Off keeps offline tool output diffable.
    pub timestamps: bool,
}

impl LoggingConfig {
    /// Config with an explicit filter string.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { env_filter: Some(filter.into()), ..Self::default() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

static INIT: Once = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Returns `true` when a logger from this crate
/// is active; `false` when another logger had already been installed.
pub fn init_logging(config: LoggingConfig) -> bool {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
            }
        }

        builder.write_style(config.write_style);
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }

        let ok = builder.try_init().is_ok();
        INSTALLED.store(ok, Ordering::Release);
        if ok {
            log::debug!("logging initialized");
        }
    });
    INSTALLED.load(Ordering::Acquire)
}
