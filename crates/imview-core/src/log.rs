//! Developer log output.
//!
//! Host plugins call [`init_logging`] once when they are loaded. Everything in
//! the bridge logs through `tracing`; without a subscriber the output is
//! simply dropped.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::config::BridgeConfig;

static LOG_INIT_ONCE: Once = Once::new();

const DEBUG_FILTER: &str = "imview=debug,imview_gl=debug,imview_core=debug";
const QUIET_FILTER: &str = "warn";

/// The filter directive `config` asks for.
pub fn filter_directive(config: &BridgeConfig) -> &str {
    match (&config.log_filter, config.debug) {
        (Some(filter), _) => filter.as_str(),
        (None, true) => DEBUG_FILTER,
        (None, false) => QUIET_FILTER,
    }
}

/// Install a stderr subscriber for the bridge. Only the first call has any
/// effect; a subscriber installed by the host beforehand is left alone.
pub fn init_logging(config: &BridgeConfig) {
    LOG_INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_new(filter_directive(config))
            .unwrap_or_else(|_| EnvFilter::new(QUIET_FILTER));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(filter = filter_directive(config), "imview logging initialised");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_selects_verbose_filter() {
        let mut config = BridgeConfig::default();
        assert_eq!(filter_directive(&config), "warn");

        config.debug = true;
        assert!(filter_directive(&config).contains("imview_gl=debug"));

        config.log_filter = Some("imview=trace".into());
        assert_eq!(filter_directive(&config), "imview=trace");
    }

    #[test]
    fn init_is_repeatable() {
        let config = BridgeConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
