use tracing::level_filters::LevelFilter;

/// Installs a stderr subscriber. Each `-d` on the command line raises the
/// level by one step, starting from warn.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(filter)
        .with_target(true)
        .init();

    tracing::debug!(?filter, "logging initialised");
}
