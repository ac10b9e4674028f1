use crate::config::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "addr-norm-check")]
#[command(about = "住所正規化APIを期待値スプレッドシートで検証するツール", long_about = None)]
pub struct Cli {
    /// 設定ファイル
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}
