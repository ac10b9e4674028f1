//! 出力シートの列構成
//!
//! 1. `SheetSchema::plan` でヘッダから最終的な列構成を決める
//! 2. `SheetSchema::project` で各行をその構成に写す
//!
//! 列挿入による位置ずれを行データに触れる前に確定させる。

use crate::columns::{EXPECTED_MARKER, RESULT_MARKER};
use crate::sheet::{Cell, Sheet};

pub const IS_CORRECT_HEADER: &str = "IsCorrect";
pub const IS_CORRECT_WIDTH: f64 = 15.0;

/// 出力列の出所
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// 入力シートの列（元の位置）
    Original(usize),
    /// EXPECTED列（元の位置）に対応するRESULT列
    Result { expected: usize },
    /// 行ごとの正誤フラグ
    IsCorrect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSchema {
    sources: Vec<ColumnSource>,
    headers: Vec<String>,
}

impl SheetSchema {
    /// EXPECTED列の直後にRESULT列、末尾にIsCorrect列を置く
    pub fn plan<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut sources = Vec::with_capacity(headers.len() + 1);
        let mut out_headers = Vec::with_capacity(headers.len() + 1);

        for (col, header) in headers.iter().enumerate() {
            let header = header.as_ref();
            sources.push(ColumnSource::Original(col));
            out_headers.push(header.to_string());

            if header.contains(EXPECTED_MARKER) {
                sources.push(ColumnSource::Result { expected: col });
                out_headers.push(header.replace(EXPECTED_MARKER, RESULT_MARKER));
            }
        }

        sources.push(ColumnSource::IsCorrect);
        out_headers.push(IS_CORRECT_HEADER.to_string());

        Self {
            sources,
            headers: out_headers,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn sources(&self) -> &[ColumnSource] {
        &self.sources
    }

    pub fn column_count(&self) -> usize {
        self.sources.len()
    }

    /// IsCorrect列の位置（常に末尾）
    pub fn is_correct_column(&self) -> usize {
        self.sources.len() - 1
    }

    /// (EXPECTED列, RESULT列) の組（出力シート上の位置、右から左の順）
    pub fn comparison_pairs(&self) -> Vec<(usize, usize)> {
        self.sources
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(col, source)| match source {
                ColumnSource::Result { .. } => Some((col - 1, col)),
                _ => None,
            })
            .collect()
    }

    /// 入力シートを出力列構成に写す（追加列は空）
    pub fn project(&self, sheet: &Sheet) -> Sheet {
        let rows = (0..sheet.rows.len())
            .map(|row| {
                self.sources
                    .iter()
                    .map(|source| match source {
                        ColumnSource::Original(col) => sheet.cell(row, *col).clone(),
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect();

        Sheet {
            name: sheet.name.clone(),
            headers: self.headers.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> Sheet {
        Sheet::from_grid(
            "Dane",
            vec![
                vec![
                    Cell::from("REQUEST city"),
                    Cell::from("EXPECTED city"),
                    Cell::from("note"),
                    Cell::from("EXPECTED postalCode"),
                ],
                vec![
                    Cell::from("Warszawa"),
                    Cell::from("Warszawa"),
                    Cell::Number(1.0),
                    Cell::from("00-001"),
                ],
                vec![Cell::from("Kraków")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_plan_column_count() {
        let sheet = sample_sheet();
        let schema = SheetSchema::plan(&sheet.headers);
        // 4列 + EXPECTED 2列 + IsCorrect
        assert_eq!(schema.column_count(), 4 + 2 + 1);
    }

    #[test]
    fn test_plan_result_follows_expected() {
        let sheet = sample_sheet();
        let schema = SheetSchema::plan(&sheet.headers);
        assert_eq!(
            schema.headers(),
            &[
                "REQUEST city",
                "EXPECTED city",
                "RESULT city",
                "note",
                "EXPECTED postalCode",
                "RESULT postalCode",
                "IsCorrect",
            ]
        );
        for (i, header) in schema.headers().iter().enumerate() {
            if header.contains(EXPECTED_MARKER) {
                let next = &schema.headers()[i + 1];
                assert_eq!(next, &header.replace(EXPECTED_MARKER, RESULT_MARKER));
            }
        }
    }

    #[test]
    fn test_plan_without_expected_columns() {
        let schema = SheetSchema::plan(&["a", "b"]);
        assert_eq!(schema.headers(), &["a", "b", IS_CORRECT_HEADER]);
        assert!(schema.comparison_pairs().is_empty());
        assert_eq!(schema.is_correct_column(), 2);
    }

    #[test]
    fn test_comparison_pairs_right_to_left() {
        let sheet = sample_sheet();
        let schema = SheetSchema::plan(&sheet.headers);
        assert_eq!(schema.comparison_pairs(), vec![(4, 5), (1, 2)]);
    }

    #[test]
    fn test_project_rows() {
        let sheet = sample_sheet();
        let schema = SheetSchema::plan(&sheet.headers);
        let projected = schema.project(&sheet);

        assert_eq!(projected.name, "Dane");
        assert_eq!(projected.headers, schema.headers());
        assert_eq!(projected.rows.len(), 2);
        assert_eq!(
            projected.rows[0],
            vec![
                Cell::from("Warszawa"),
                Cell::from("Warszawa"),
                Cell::Empty,
                Cell::Number(1.0),
                Cell::from("00-001"),
                Cell::Empty,
                Cell::Empty,
            ]
        );
        // 短い行は空セルで埋まる
        assert_eq!(projected.rows[1].len(), 7);
        assert_eq!(projected.rows[1][0], Cell::from("Kraków"));
        assert!(projected.rows[1][1..].iter().all(Cell::is_empty));
    }
}
