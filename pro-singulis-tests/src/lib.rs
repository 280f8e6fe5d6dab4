pub mod json;
pub mod mapping;
pub mod sequence;

// events from the libraries show up in `cargo test -- --nocapture` with RUST_LOG set
#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
