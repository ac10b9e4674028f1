//! Excel生成（共通ライブラリ）
//!
//! 採点済みの行を出力列構成どおりに書き出す。
//! RESULT列は比較結果で塗り分け、IsCorrect列にはオートフィルタを付ける。
//! 2枚目以降のシートは値をそのまま書き戻す。

use crate::schema::{SheetSchema, IS_CORRECT_WIDTH};
use crate::scorer::{PairColor, ScoredRow};
use crate::sheet::{Cell, RawSheet};
use rust_xlsxwriter::*;

/// Excelの行・列上限
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// 日付・日時セルの表示形式
const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

fn fill_format(color: PairColor) -> Format {
    Format::new().set_background_color(Color::RGB(color.rgb()))
}

fn date_format(serial: f64, base: Option<&Format>) -> Format {
    let num_format = if serial.fract() == 0.0 {
        DATE_FORMAT
    } else {
        DATETIME_FORMAT
    };
    base.cloned()
        .unwrap_or_default()
        .set_num_format(num_format)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match (cell, format) {
        (Cell::Empty, None) => {}
        (Cell::Empty, Some(f)) => {
            worksheet.write_blank(row, col, f)?;
        }
        (Cell::Text(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (Cell::Text(s), Some(f)) => {
            worksheet.write_string_with_format(row, col, s, f)?;
        }
        (Cell::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (Cell::Number(n), Some(f)) => {
            worksheet.write_number_with_format(row, col, *n, f)?;
        }
        (Cell::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (Cell::Bool(b), Some(f)) => {
            worksheet.write_boolean_with_format(row, col, *b, f)?;
        }
        (Cell::DateTime(serial), f) => {
            worksheet.write_number_with_format(row, col, *serial, &date_format(*serial, f))?;
        }
    }
    Ok(())
}

fn is_valid_sheet_name(name: &str) -> bool {
    Worksheet::new().set_name(name).is_ok()
}

/// 出力シート名を決める
///
/// Excelで使えない名前・重複する名前は `SheetN` に置き換える。
fn output_sheet_names(primary: &str, others: &[RawSheet]) -> Vec<String> {
    let requested: Vec<&str> = std::iter::once(primary)
        .chain(others.iter().map(|s| s.name.as_str()))
        .collect();
    let is_taken = |names: &[String], candidate: &str| {
        names
            .iter()
            .any(|n| n.to_lowercase() == candidate.to_lowercase())
    };

    let mut names: Vec<String> = Vec::with_capacity(requested.len());
    for (i, name) in requested.iter().enumerate() {
        if is_valid_sheet_name(name) && !is_taken(&names, name) {
            names.push(name.to_string());
            continue;
        }

        let fallback = (i + 1..)
            .map(|n| format!("Sheet{}", n))
            .find(|candidate| {
                !is_taken(&names, candidate)
                    && !requested
                        .iter()
                        .any(|r| r.to_lowercase() == candidate.to_lowercase())
            })
            .unwrap_or_default();
        tracing::warn!(original = %name, fallback = %fallback, "シート名が使えないため既定名で出力します");
        names.push(fallback);
    }
    names
}

/// 結果ワークブックをバッファに生成
///
/// # Arguments
/// * `sheet_name` - シート名（入力シートと同じ名前）
/// * `schema` - 出力列構成
/// * `rows` - 採点済みの行（データ行の順）
/// * `others` - 入力の2枚目以降のシート（入力と同じ順で後ろに付ける）
pub fn generate_result_buffer(
    sheet_name: &str,
    schema: &SheetSchema,
    rows: &[ScoredRow],
    others: &[RawSheet],
) -> Result<Vec<u8>, String> {
    if schema.column_count() > MAX_COLS {
        return Err(format!("列数が上限を超えています: {}", schema.column_count()));
    }
    if rows.len() + 1 > MAX_ROWS {
        return Err(format!("行数が上限を超えています: {}", rows.len() + 1));
    }

    let mut workbook = Workbook::new();
    let green = fill_format(PairColor::Green);
    let red = fill_format(PairColor::Red);
    let names = output_sheet_names(sheet_name, others);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(&names[0])
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    // ヘッダ行
    for (col, header) in schema.headers().iter().enumerate() {
        worksheet
            .write_string(0, col as u16, header)
            .map_err(|e| format!("ヘッダ書き込みエラー: {}", e))?;
    }

    // データ行
    for (i, scored) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in scored.cells.iter().enumerate() {
            let format = scored
                .fills
                .iter()
                .find(|(fill_col, _)| *fill_col == col)
                .map(|(_, color)| match color {
                    PairColor::Green => &green,
                    PairColor::Red => &red,
                });
            write_cell(worksheet, row, col as u16, cell, format)
                .map_err(|e| format!("セル書き込みエラー ({}, {}): {}", row + 1, col + 1, e))?;
        }
    }

    // IsCorrect列
    let is_correct_col = schema.is_correct_column() as u16;
    worksheet
        .set_column_width(is_correct_col, IS_CORRECT_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet
        .autofilter(0, is_correct_col, rows.len() as u32, is_correct_col)
        .map_err(|e| format!("オートフィルタ設定エラー: {}", e))?;

    // 対象外シート
    for (sheet, name) in others.iter().zip(&names[1..]) {
        if sheet.grid.len() > MAX_ROWS {
            return Err(format!("{}: 行数が上限を超えています: {}", name, sheet.grid.len()));
        }
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(name)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        for (row, cells) in sheet.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate().take(MAX_COLS) {
                write_cell(worksheet, row as u32, col as u16, cell, None)
                    .map_err(|e| format!("{}: セル書き込みエラー ({}, {}): {}", name, row + 1, col + 1, e))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
