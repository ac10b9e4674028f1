use crate::error::{NormCheckError, Result};
use addr_norm_common::export::excel_core::generate_result_buffer;
use addr_norm_common::{RawSheet, ScoredRow, SheetSchema};
use std::path::Path;

/// 結果ワークブックを保存
pub fn save_result(
    output_path: &Path,
    sheet_name: &str,
    schema: &SheetSchema,
    rows: &[ScoredRow],
    others: &[RawSheet],
) -> Result<()> {
    let buffer = generate_result_buffer(sheet_name, schema, rows, others)
        .map_err(NormCheckError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(output_path, buffer)?;
    Ok(())
}
