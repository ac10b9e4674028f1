//! メモリ上のシート表現
//!
//! 読み込み元（calamine）にも書き出し先（rust_xlsxwriter）にも依存しない。

use crate::error::{Error, Result};

/// セル値
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excelのシリアル値（書き出し時に日付書式を付ける）
    DateTime(f64),
}

impl Cell {
    /// 比較・リクエスト用の文字列表現
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) | Cell::DateTime(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// 空セルが "null" 文字列として現れるデータへの対策
pub fn normalize_null(text: &str) -> &str {
    if text == "null" {
        ""
    } else {
        text
    }
}

/// 1シート分のデータ（1行目がヘッダ）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// 先頭行をヘッダとして分離
    pub fn from_grid(name: impl Into<String>, mut grid: Vec<Vec<Cell>>) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::EmptySheet);
        }
        let header_row = grid.remove(0);
        let headers = header_row.iter().map(Cell::text).collect();
        Ok(Self {
            name: name.into(),
            headers,
            rows: grid,
        })
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// 行外・列外は空セル扱い
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }
}

/// 処理対象外のシート。値を加工せずそのまま書き戻す
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub grid: Vec<Vec<Cell>>,
}
