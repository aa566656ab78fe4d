// region:    --- Modules
pub mod api;
pub mod auction;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

// endregion: --- Modules

/// Initialize logging: env-filtered, terse output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .try_init();
}
