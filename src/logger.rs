use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志系统
///
/// 设置了 `RUST_LOG` 时以其为准，否则使用 `default_level`
/// （默认 `info`，加 `-v` 时为 `debug`）
///
/// - RUST_LOG=debug statspost watch <id>
/// - RUST_LOG=statspost::http=trace statspost poll <id>
pub fn init_logger(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logger initialized");
}
