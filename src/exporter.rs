use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::normalizer::{NormalizedRow, COLUMNS};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] XlsxError),
}

/// Writes normalized rows to a single-sheet `.xlsx` workbook.
///
/// Header row = [`COLUMNS`], one row per [`NormalizedRow`], no formatting.
/// Numeric fields stay numeric; empty optional fields stay blank cells.
pub struct ExcelExporter;

impl ExcelExporter {
    fn build_workbook(rows: &[NormalizedRow]) -> Result<Workbook, ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, name) in COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_string(r, 0, &row.name)?;
            if let Some(month) = row.month {
                worksheet.write_number(r, 1, month as f64)?;
            }
            if let Some(year) = row.year {
                worksheet.write_number(r, 2, year as f64)?;
            }
            worksheet.write_string(r, 3, &row.commodity_name)?;
            if let Some(product_name) = &row.product_name {
                worksheet.write_string(r, 4, product_name)?;
            }
            worksheet.write_string(r, 5, &row.location_name)?;
            worksheet.write_string(r, 6, &row.typ)?;
            worksheet.write_string(r, 7, &row.classificat)?;
            worksheet.write_number(r, 8, row.value)?;
            worksheet.write_string(r, 9, &row.unit)?;
            if let Some(hs_code) = &row.hs_code {
                worksheet.write_string(r, 10, hs_code)?;
            }
            worksheet.write_string(r, 11, &row.source)?;
            worksheet.write_string(r, 12, &row.hs_code_reference)?;
            worksheet.write_string(r, 13, &row.country)?;
            worksheet.write_string(r, 14, &row.pelabuhan)?;
        }

        Ok(workbook)
    }

    /// Serialize rows to xlsx bytes in memory.
    pub fn write_to_buffer(rows: &[NormalizedRow]) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Self::build_workbook(rows)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Serialize rows to an xlsx file on disk.
    pub fn write_to_file(rows: &[NormalizedRow], path: &Path) -> Result<(), ExportError> {
        let mut workbook = Self::build_workbook(rows)?;
        workbook.save(path)?;
        info!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}
