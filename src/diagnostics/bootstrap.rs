use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

pub const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    pub filter: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

pub struct Diagnostics {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Diagnostics {
    /// Installs the global subscriber. Call once per process.
    pub fn new_bootstrap() -> Self {
        let filter = EnvFilter::new(DEFAULT_FILTER);
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();

        Self { reload_handle }
    }

    pub fn reload_from_config(&self, config: &DiagnosticsConfig) -> Result<()> {
        let filter = parse_filter(&config.filter)?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| anyhow!(e))
}
