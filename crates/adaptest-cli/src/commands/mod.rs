pub mod ingredients;
pub mod resolve;

use adaptest_rules::SessionConfig;

pub(crate) fn load_config_or_exit(path: &str) -> SessionConfig {
    tracing::debug!(path, "loading session config");
    SessionConfig::load(path).unwrap_or_else(|err| {
        eprintln!("error: failed to load session config: {err}");
        std::process::exit(1);
    })
}
