//! 実行結果の集計

use crate::scorer::{Correctness, ScoredRow};
use crate::types::ApiOutcome;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    /// RESULT列に書き込んだ行
    pub accepted: usize,
    /// APIは成功したが閾値未満・住所なし
    pub below_threshold: usize,
    /// 2xx以外
    pub rejected: usize,
    /// ボディ不正
    pub malformed: usize,
    /// 接続エラー・タイムアウト
    pub transport_errors: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unknown: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &ApiOutcome, scored: &ScoredRow) {
        self.rows += 1;

        match outcome {
            ApiOutcome::Success(_) if scored.accepted => self.accepted += 1,
            ApiOutcome::Success(_) => self.below_threshold += 1,
            ApiOutcome::Rejected { .. } => self.rejected += 1,
            ApiOutcome::Malformed(_) => self.malformed += 1,
            ApiOutcome::Transport(_) => self.transport_errors += 1,
        }

        match scored.correctness {
            Correctness::Correct => self.correct += 1,
            Correctness::Incorrect => self.incorrect += 1,
            Correctness::Unknown => self.unknown += 1,
        }
    }

    pub fn api_failures(&self) -> usize {
        self.rejected + self.malformed + self.transport_errors
    }

    /// 正解率（比較対象のある行のみ）
    pub fn accuracy(&self) -> Option<f64> {
        let scored = self.correct + self.incorrect;
        if scored == 0 {
            None
        } else {
            Some(self.correct as f64 / scored as f64)
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows={} accepted={} below_threshold={} api_failures={} (rejected={} malformed={} transport={}) correct={} incorrect={}",
            self.rows,
            self.accepted,
            self.below_threshold,
            self.api_failures(),
            self.rejected,
            self.malformed,
            self.transport_errors,
            self.correct,
            self.incorrect,
        )?;
        if let Some(accuracy) = self.accuracy() {
            write!(f, " accuracy={:.1}%", accuracy * 100.0)?;
        }
        Ok(())
    }
}
