use crate::env_opt;

/// Where structured JSON logs are written, if anywhere.
///
/// Console output is always on; the level filter comes from `RUST_LOG`.
#[derive(Clone, Debug, Default)]
pub struct LoggingConfig {
    pub log_dir: Option<String>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            log_dir: env_opt("LOG_DIR"),
        }
    }
}
