use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ログ初期化（RUST_LOG があればそちらを優先）
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("addr_norm_check={level},addr_norm_common={level}"))
    });

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // 二重初期化（テスト等）は無視
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
