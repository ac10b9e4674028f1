//! 正規化APIクライアント
//!
//! 失敗はエラーとして伝播させず `ApiOutcome` の種別で返す。
//! 採点側ではどの失敗も空レスポンスとして扱う。

use crate::error::{NormCheckError, Result};
use addr_norm_common::{ApiOutcome, NormalizationRequest, NormalizationResponse};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NormalizationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl NormalizationClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NormCheckError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// 1行分のリクエストを送信
    pub async fn call(&self, request: &NormalizationRequest) -> ApiOutcome {
        let response = match self.http.post(&self.endpoint).json(request).send().await {
            Ok(r) => r,
            Err(e) => return ApiOutcome::Transport(describe(&e)),
        };

        let status = response.status();
        if !status.is_success() {
            return ApiOutcome::Rejected {
                status: status.as_u16(),
            };
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return ApiOutcome::Transport(describe(&e)),
        };

        match NormalizationResponse::parse(&body) {
            Ok(parsed) => ApiOutcome::Success(parsed),
            Err(e) => ApiOutcome::Malformed(e.to_string()),
        }
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timeout: {}", error)
    } else if error.is_connect() {
        format!("connect: {}", error)
    } else {
        error.to_string()
    }
}
