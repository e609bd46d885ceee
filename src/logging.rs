// Logging setup shared by the binary entry point.

/// Initialize tracing with a sane default filter. `log` macro records from
/// the cache and client modules flow into the same subscriber.
pub fn init() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "folio=info,axum=info");
    }

    // Try to initialize tracing, ignore if already initialized
    let _ = tracing_subscriber::fmt::try_init();
}
