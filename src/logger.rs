use log::LevelFilter;

/// Install the stderr logger. `RUST_LOG` wins over the default level.
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .try_init();
}

pub fn log_line(line: &str) {
    log::info!("{}", line);
}

pub fn log_error(prefix: &str, e: &dyn std::error::Error) {
    log::error!("{}: {}", prefix, e);
}
