use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::{LogEnv, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

impl LogEnv {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(self) -> &'static str {
        match self {
            LogEnv::Local | LogEnv::Dev => "debug,sqlx=warn,tower_http=debug",
            LogEnv::Prod => "info,sqlx=warn,tower_http=info",
        }
    }
}

/// Installs the global subscriber.
///
/// `local` logs human-readable text, `dev` and `prod` log JSON. With `dir` set,
/// a daily-rotated JSON file is written as well. Keep the returned guards alive
/// for the life of the process so the non-blocking writers flush.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<Vec<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.env.default_filter()));

    let mut guards = Vec::new();
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);
    match cfg.env {
        LogEnv::Local => layers.push(tracing_subscriber::fmt::layer().with_writer(stdout_nb).boxed()),
        LogEnv::Dev | LogEnv::Prod => {
            layers.push(tracing_subscriber::fmt::layer().json().with_writer(stdout_nb).boxed())
        }
    }

    if let Some(dir) = cfg.dir.as_deref() {
        std::fs::create_dir_all(dir)?;
        let file_appender = tracing_appender::rolling::daily(dir, "songbook.log");
        let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);
        layers.push(tracing_subscriber::fmt::layer().json().with_ansi(false).with_writer(file_nb).boxed());
    }

    tracing_subscriber::registry().with(layers).with(env_filter).try_init()?;
    Ok(guards)
}
