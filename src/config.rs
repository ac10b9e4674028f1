use crate::error::{NormCheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";

/// 実行設定（appsettings.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// 入力スプレッドシート
    #[serde(default)]
    pub original_file_path: PathBuf,
    /// 出力スプレッドシート（入力とは別のパス）
    #[serde(default)]
    pub result_file_path: PathBuf,
    #[serde(default)]
    pub api_url: String,
    #[serde(default = "default_probability_threshold")]
    pub probability_threshold: f64,
    #[serde(default = "default_max_parallel_requests")]
    pub max_parallel_requests: usize,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_probability_threshold() -> f64 {
    0.8
}

fn default_max_parallel_requests() -> usize {
    10
}

fn default_request_timeout_seconds() -> u64 {
    30
}

/// 比較用の絶対パス
///
/// `.` と `..` を畳み、親ディレクトリが存在すればシンボリックリンクも解決する。
fn resolve_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    let (Some(parent), Some(file_name)) = (normalized.parent(), normalized.file_name()) else {
        return normalized;
    };
    match parent.canonicalize() {
        Ok(parent) => parent.join(file_name),
        Err(_) => normalized,
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NormCheckError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.original_file_path.as_os_str().is_empty() {
            return Err(NormCheckError::Config("OriginalFilePath が未設定です".into()));
        }
        if self.result_file_path.as_os_str().is_empty() {
            return Err(NormCheckError::Config("ResultFilePath が未設定です".into()));
        }
        if self.api_url.trim().is_empty() {
            return Err(NormCheckError::Config("ApiUrl が未設定です".into()));
        }
        if resolve_path(&self.original_file_path) == resolve_path(&self.result_file_path) {
            return Err(NormCheckError::Config(
                "ResultFilePath は OriginalFilePath と別のパスにしてください".into(),
            ));
        }
        if !self.probability_threshold.is_finite() {
            return Err(NormCheckError::Config(format!(
                "ProbabilityThreshold が不正です: {}",
                self.probability_threshold
            )));
        }
        Ok(())
    }

    /// 同時リクエスト数（0は1として扱う）
    pub fn parallelism(&self) -> usize {
        self.max_parallel_requests.max(1)
    }
}
