use addr_norm_check::{cli, config, error, logging, runner};
use clap::Parser;
use cli::Cli;
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    println!("🏠 addr-norm-check - 住所正規化API検証\n");

    let config = Config::load(&cli.config)?;
    let summary = runner::run(&config).await?;

    println!("\n結果:");
    println!("  行数: {}", summary.rows);
    println!("  採用: {} / 閾値未満: {}", summary.accepted, summary.below_threshold);
    println!(
        "  API失敗: {} (ステータス: {}, 不正レスポンス: {}, 通信: {})",
        summary.api_failures(),
        summary.rejected,
        summary.malformed,
        summary.transport_errors
    );
    println!("  正解: {} / 不正解: {}", summary.correct, summary.incorrect);
    if let Some(accuracy) = summary.accuracy() {
        println!("  正解率: {:.1}%", accuracy * 100.0);
    }

    println!("\n✅ 完了");
    Ok(())
}
