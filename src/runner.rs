//! 検証の実行
//!
//! 1. 入力シートを読み込み、出力列構成を決める
//! 2. 全行のAPI呼び出し（同時実行数は設定値まで）
//! 3. 行順に採点・色付け
//! 4. 結果ワークブックを保存

use crate::client::NormalizationClient;
use crate::config::Config;
use crate::error::Result;
use crate::{export, reader};
use addr_norm_common::{
    read_request, score_row, ApiOutcome, ColumnIndexes, Field, NormalizationRequest,
    NormalizationResponse, RunSummary, SheetSchema,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// データ行の先頭（1始まり、ヘッダの次）
const FIRST_DATA_ROW: usize = 2;

pub async fn run(config: &Config) -> Result<RunSummary> {
    println!("[1/4] 入力ファイルを読み込み中...");
    let input = reader::read_workbook(&config.original_file_path)?;
    let schema = SheetSchema::plan(&input.primary.headers);
    let projected = schema.project(&input.primary);
    let indexes = ColumnIndexes::resolve(schema.headers());
    report_missing_columns(&indexes);
    println!(
        "✔ {}行 / 比較列 {}組 (他シート {}枚はそのまま出力)\n",
        projected.rows.len(),
        schema.comparison_pairs().len(),
        input.others.len()
    );

    let client = NormalizationClient::new(
        config.api_url.clone(),
        Duration::from_secs(config.request_timeout_seconds),
    )?;

    println!("[2/4] API呼び出し中... (同時実行数: {})", config.parallelism());
    let requests: Vec<NormalizationRequest> = projected
        .rows
        .iter()
        .map(|row| read_request(row, &indexes))
        .collect();
    let outcomes = fetch_all(&client, requests, config.parallelism()).await;
    println!("✔ API呼び出し完了\n");

    println!("[3/4] 採点中...");
    let empty = NormalizationResponse::default();
    let mut summary = RunSummary::default();
    let mut scored_rows = Vec::with_capacity(projected.rows.len());

    for (i, (row, outcome)) in projected.rows.into_iter().zip(outcomes).enumerate() {
        if !outcome.is_success() {
            tracing::debug!(row = i + FIRST_DATA_ROW, ?outcome, "API call failed, scoring as empty");
        }

        let response = outcome.response().unwrap_or(&empty);
        let scored = score_row(row, &schema, &indexes, response, config.probability_threshold);
        summary.record(&outcome, &scored);
        scored_rows.push(scored);
    }
    println!("✔ 採点完了\n");

    println!("[4/4] 結果を保存中...");
    export::save_result(
        &config.result_file_path,
        &projected.name,
        &schema,
        &scored_rows,
        &input.others,
    )?;
    println!("✔ 結果を保存: {}", config.result_file_path.display());

    tracing::info!(%summary, "run finished");
    Ok(summary)
}

fn report_missing_columns(indexes: &ColumnIndexes) {
    let names = |fields: Vec<Field>| {
        fields
            .iter()
            .map(|f| f.marker())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let missing_request = indexes.missing_request();
    if !missing_request.is_empty() {
        tracing::warn!(fields = %names(missing_request), "REQUEST columns not found, sending empty values");
    }

    let missing_result = indexes.missing_result();
    if !missing_result.is_empty() {
        tracing::warn!(fields = %names(missing_result), "RESULT columns not found, fields will not be written");
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// 全行分のリクエストを送信し、行順の結果を返す
async fn fetch_all(
    client: &NormalizationClient,
    requests: Vec<NormalizationRequest>,
    parallelism: usize,
) -> Vec<ApiOutcome> {
    let total = requests.len();
    let bar = progress_bar(total);
    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
    let mut tasks = JoinSet::new();

    for (i, request) in requests.into_iter().enumerate() {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => client.call(&request).await,
                Err(e) => ApiOutcome::Transport(e.to_string()),
            };
            (i, outcome)
        });
    }

    let mut outcomes: Vec<Option<ApiOutcome>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((i, outcome)) => {
                outcomes[i] = Some(outcome);
                bar.inc(1);
            }
            Err(e) => tracing::warn!(error = %e, "request task failed"),
        }
    }
    bar.finish_and_clear();

    outcomes
        .into_iter()
        .map(|o| o.unwrap_or_else(|| ApiOutcome::Transport("request task aborted".into())))
        .collect()
}
