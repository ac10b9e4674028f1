//! 正規化APIの型定義
//!
//! - NormalizationRequest: APIへ送るリクエストボディ
//! - NormalizationResponse: APIのレスポンス（メタデータ + 住所）
//! - ApiOutcome: 1回の呼び出し結果（成功/失敗の種別を保持）

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// APIへ送るリクエスト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizationRequest {
    pub street_name: String,
    pub street_prefix: String,
    pub building_number: String,
    pub city: String,
    pub postal_code: String,
}

/// APIレスポンス
///
/// どのフィールドも存在を前提にしない。失敗時は両方とも `None`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizationResponse {
    #[serde(alias = "metadata", alias = "NormalizationMetadata")]
    pub normalization_metadata: Option<NormalizationMetadata>,

    #[serde(alias = "Address")]
    pub address: Option<NormalizedAddress>,
}

/// 信頼度メタデータ
///
/// PascalCaseで返す実装もあるため、各フィールドに別名を付けている。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizationMetadata {
    #[serde(alias = "StreetProbability")]
    pub street_probability: f64,
    #[serde(alias = "PostalCodeProbability")]
    pub postal_code_probability: f64,
    #[serde(alias = "CityProbability")]
    pub city_probability: f64,
    #[serde(alias = "CombinedProbability")]
    pub combined_probability: f64,
    #[serde(alias = "NormalizationId")]
    pub normalization_id: Option<i64>,
}

/// 正規化済み住所
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedAddress {
    #[serde(alias = "BuildingNumber")]
    pub building_number: Option<String>,
    #[serde(alias = "City")]
    pub city: Option<String>,
    #[serde(alias = "Commune")]
    pub commune: Option<String>,
    #[serde(alias = "District")]
    pub district: Option<String>,
    #[serde(alias = "PostalCode")]
    pub postal_code: Option<String>,
    #[serde(alias = "Province")]
    pub province: Option<String>,
    #[serde(alias = "StreetName")]
    pub street_name: Option<String>,
    #[serde(alias = "StreetPrefix")]
    pub street_prefix: Option<String>,
    #[serde(alias = "IsMultiFamily")]
    pub is_multi_family: bool,
    #[serde(alias = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(alias = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(alias = "PostOfficeLocation")]
    pub post_office_location: Option<String>,
}

impl NormalizationResponse {
    /// レスポンスボディをパース
    ///
    /// `null` ボディは空レスポンスとして扱う。
    pub fn parse(body: &[u8]) -> Result<Self> {
        let parsed: Option<Self> = serde_json::from_slice(body)?;
        Ok(parsed.unwrap_or_default())
    }

    /// 閾値を満たす場合のみ住所を返す（境界値は採用）
    pub fn accepted_address(&self, threshold: f64) -> Option<&NormalizedAddress> {
        let metadata = self.normalization_metadata.as_ref()?;
        if metadata.combined_probability >= threshold {
            self.address.as_ref()
        } else {
            None
        }
    }
}

/// API呼び出し1回分の結果
///
/// 失敗はすべて空レスポンスとして採点されるが、診断用に種別を区別する。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Success(NormalizationResponse),
    /// 2xx以外のステータス
    Rejected { status: u16 },
    /// ボディが空、またはパース失敗
    Malformed(String),
    /// 接続エラー・タイムアウト
    Transport(String),
}

impl ApiOutcome {
    /// 採点に使うレスポンス（失敗時は `None`、空レスポンスとして扱う）
    pub fn response(&self) -> Option<&NormalizationResponse> {
        match self {
            ApiOutcome::Success(response) => Some(response),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }
}
