use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging in a thread-safe way.
/// Logging is set up only once, however many tests call this.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .finish();

        // Another harness may already own the global default
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Write `body` to a fresh temp file ending in `suffix`.
pub fn write_dataset(
    suffix: &str,
    body: &str,
) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(body.as_bytes())?;
    file.flush()?;
    Ok(file)
}
