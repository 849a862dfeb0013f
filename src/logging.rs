use log::LevelFilter;

/// Environment variable read by [`init_logging`] to override the filter.
pub const LOG_ENV_VAR: &str = "GP_SPARSE_LOG";

const DEFAULT_FILTER: &str = "warn,gp_sparse=info";

/// Install an `env_logger` backend for the `log` facade.
///
/// The filter defaults to `warn,gp_sparse=info` and can be replaced through
/// `GP_SPARSE_LOG`, e.g. `GP_SPARSE_LOG=gp_sparse=trace`. Calling this more
/// than once is harmless; only the first call installs a logger and returns
/// `true`.
pub fn init_logging() -> bool {
    let installed = env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or(LOG_ENV_VAR, DEFAULT_FILTER))
        .format_timestamp(None)
        .try_init();
    match installed {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Logger already installed, keeping it: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_logger() {
        init_logging();
        assert!(!init_logging());
        log::debug!("logger initialised");
    }
}
