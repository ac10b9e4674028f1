//! 行単位の採点
//!
//! - リクエスト項目の読み取り
//! - 閾値を満たしたAPI結果のRESULT列への書き込み
//! - EXPECTED/RESULTの比較と色付け、行の正誤集計

use crate::columns::{ColumnIndexes, Field};
use crate::schema::SheetSchema;
use crate::sheet::{normalize_null, Cell};
use crate::types::{NormalizationRequest, NormalizationResponse, NormalizedAddress};

/// 比較結果の色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairColor {
    Green,
    Red,
}

impl PairColor {
    /// RGB値（Excelの標準色 Green / Red）
    pub fn rgb(self) -> u32 {
        match self {
            PairColor::Green => 0x008000,
            PairColor::Red => 0xFF0000,
        }
    }
}

/// 行の正誤
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Correctness {
    /// 比較対象なし
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

impl Correctness {
    /// 一度 Incorrect になったら戻らない
    pub fn record(self, color: PairColor) -> Self {
        match (self, color) {
            (Correctness::Incorrect, _) => Correctness::Incorrect,
            (_, PairColor::Red) => Correctness::Incorrect,
            (_, PairColor::Green) => Correctness::Correct,
        }
    }

    /// セル値（Unknownは空セル）
    pub fn to_cell(self) -> Cell {
        match self {
            Correctness::Unknown => Cell::Empty,
            Correctness::Correct => Cell::Number(1.0),
            Correctness::Incorrect => Cell::Number(0.0),
        }
    }
}

/// 採点済みの1行
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub cells: Vec<Cell>,
    /// (列位置, 色)
    pub fills: Vec<(usize, PairColor)>,
    pub correctness: Correctness,
    /// RESULT列に書き込んだか
    pub accepted: bool,
}

/// 大文字小文字を区別せずに比較（"null" は空文字扱い）
pub fn values_match(expected: &str, result: &str) -> bool {
    let expected = normalize_null(expected);
    let result = normalize_null(result);
    expected == result || expected.to_lowercase() == result.to_lowercase()
}

/// 行からリクエストを組み立てる（列がない項目は空文字）
pub fn read_request(row: &[Cell], indexes: &ColumnIndexes) -> NormalizationRequest {
    let read = |field: Field| -> String {
        indexes
            .request(field)
            .and_then(|col| row.get(col))
            .map(|cell| normalize_null(&cell.text()).to_string())
            .unwrap_or_default()
    };

    NormalizationRequest {
        street_name: read(Field::StreetName),
        street_prefix: read(Field::StreetPrefix),
        building_number: read(Field::BuildingNumber),
        city: read(Field::City),
        postal_code: read(Field::PostalCode),
    }
}

fn address_value(address: &NormalizedAddress, field: Field) -> Option<&str> {
    let value = match field {
        Field::StreetName => &address.street_name,
        Field::StreetPrefix => &address.street_prefix,
        Field::BuildingNumber => &address.building_number,
        Field::City => &address.city,
        Field::PostalCode => &address.postal_code,
        Field::Commune => &address.commune,
        Field::District => &address.district,
        Field::Province => &address.province,
    };
    value.as_deref()
}

/// RESULT列に住所を書き込む（列がない項目はスキップ）
pub fn write_address(row: &mut [Cell], indexes: &ColumnIndexes, address: &NormalizedAddress) {
    for field in Field::ALL {
        let Some(col) = indexes.result(field) else {
            continue;
        };
        let Some(cell) = row.get_mut(col) else {
            continue;
        };
        *cell = match address_value(address, field) {
            Some(value) => Cell::Text(value.to_string()),
            None => Cell::Empty,
        };
    }
}

/// EXPECTED/RESULTの組を比較して色と正誤を決める
pub fn compare_row(row: &[Cell], schema: &SheetSchema) -> (Vec<(usize, PairColor)>, Correctness) {
    let mut fills = Vec::new();
    let mut correctness = Correctness::Unknown;

    for (expected_col, result_col) in schema.comparison_pairs() {
        let expected = row.get(expected_col).map(Cell::text).unwrap_or_default();
        let result = row.get(result_col).map(Cell::text).unwrap_or_default();

        let color = if values_match(&expected, &result) {
            PairColor::Green
        } else {
            PairColor::Red
        };

        fills.push((result_col, color));
        correctness = correctness.record(color);
    }

    (fills, correctness)
}

/// 1行を採点する
///
/// `row` は出力列構成に写した後の行。閾値を満たさない場合RESULT列は空のまま。
pub fn score_row(
    mut row: Vec<Cell>,
    schema: &SheetSchema,
    indexes: &ColumnIndexes,
    response: &NormalizationResponse,
    threshold: f64,
) -> ScoredRow {
    let accepted = match response.accepted_address(threshold) {
        Some(address) => {
            write_address(&mut row, indexes, address);
            true
        }
        None => false,
    };

    let (fills, correctness) = compare_row(&row, schema);

    let is_correct_col = schema.is_correct_column();
    if let Some(cell) = row.get_mut(is_correct_col) {
        *cell = correctness.to_cell();
    }

    ScoredRow {
        cells: row,
        fills,
        correctness,
        accepted,
    }
}
