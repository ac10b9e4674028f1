//! 入力スプレッドシートの読み込み（calamine）
//!
//! 採点対象は先頭シートのみ。2枚目以降は書き戻し用にそのまま保持する。
//! セル位置は絶対位置で保持する（A1始まりでなくてもずれない）。

use crate::error::{NormCheckError, Result};
use addr_norm_common::{Cell, RawSheet, Sheet};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// 読み込んだ入力ブック
#[derive(Debug, Clone)]
pub struct InputWorkbook {
    /// 採点対象の先頭シート
    pub primary: Sheet,
    /// 2枚目以降のシート（ブック内の順）
    pub others: Vec<RawSheet>,
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}

/// Range を A1 起点のグリッドに変換
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let (Some((start_row, start_col)), Some((end_row, end_col))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    let width = end_col as usize + 1;
    let mut grid = vec![vec![Cell::Empty; width]; end_row as usize + 1];

    for (row, col, data) in range.used_cells() {
        let abs_row = start_row as usize + row;
        let abs_col = start_col as usize + col;
        grid[abs_row][abs_col] = to_cell(data);
    }

    grid
}

/// ブック全体を読み込む（先頭シートが採点対象）
pub fn read_workbook(path: &Path) -> Result<InputWorkbook> {
    if !path.exists() {
        return Err(NormCheckError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| NormCheckError::WorkbookRead(format!("{}: {}", path.display(), e)))?;

    let sheet_names = workbook.sheet_names();
    let Some((primary_name, other_names)) = sheet_names.split_first() else {
        return Err(NormCheckError::SheetNotFound(path.display().to_string()));
    };

    let mut load = |name: &str| -> Result<Vec<Vec<Cell>>> {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| NormCheckError::WorkbookRead(format!("{}: {}", name, e)))?;
        let grid = range_to_grid(&range);
        tracing::debug!(sheet = %name, rows = grid.len(), "worksheet loaded");
        Ok(grid)
    };

    let primary = Sheet::from_grid(primary_name.clone(), load(primary_name.as_str())?)?;
    let others = other_names
        .iter()
        .map(|name| {
            Ok(RawSheet {
                name: name.clone(),
                grid: load(name.as_str())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(InputWorkbook { primary, others })
}
