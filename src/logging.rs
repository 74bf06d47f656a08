//! Logger setup for each target

use log::LevelFilter;

fn level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// Initializes the global logger.
///
/// When `verbose` is `true`, tracker and event debug messages are printed.
/// `RUST_LOG` still overrides the default filter.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(verbose: bool) {
    use env_logger::{Builder, Env};

    let env = Env::default().default_filter_or(level(verbose).to_string());
    // Fails only if a logger is already installed (tests, embedding hosts)
    let _ = Builder::from_env(env).try_init();
}

/// Initializes the browser console logger and panic hook.
#[cfg(target_arch = "wasm32")]
pub fn init(verbose: bool) {
    console_error_panic_hook::set_once();
    let level = level(verbose).to_level().unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);
}
