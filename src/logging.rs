// src/logging.rs

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a global fmt subscriber filtered by `RUST_LOG`.
/// Returns quietly if the host already installed one.
pub fn init() {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lowcode_helpers=info"));
    let _ = FmtSubscriber::builder().with_env_filter(env).try_init();
}

/// Test logging: routes output through the libtest capture.
pub fn init_test() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lowcode_helpers=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_repeatable() {
        init_test();
        init();
        init();
        tracing::debug!("still alive");
    }
}
