//! `.xlsx` template backend.

use std::path::{Path, PathBuf};

use rust_decimal::prelude::ToPrimitive;

use super::InvoiceTemplate;
use super::layout::{CellValue, CellWrite};
use crate::core::{KatalogError, Result, parse_cell_ref};

/// An existing workbook that is filled in and saved over itself.
///
/// The workbook is never created: a missing file is a precondition failure.
#[derive(Debug, Clone)]
pub struct XlsxTemplate {
    path: PathBuf,
}

impl XlsxTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvoiceTemplate for XlsxTemplate {
    fn fill(&mut self, writes: &[CellWrite]) -> Result<()> {
        if let Some(bad) = writes.iter().find(|w| parse_cell_ref(&w.cell).is_none()) {
            return Err(KatalogError::Config(format!("invalid cell reference '{}'", bad.cell)));
        }
        if !self.path.is_file() {
            return Err(KatalogError::Precondition(format!(
                "template {} does not exist",
                self.path.display()
            )));
        }

        let mut book = umya_spreadsheet::reader::xlsx::read(&self.path).map_err(|e| {
            KatalogError::Precondition(format!(
                "cannot read template {}: {e}",
                self.path.display()
            ))
        })?;

        let sheet = book.get_active_sheet_mut();
        for write in writes {
            let cell = sheet.get_cell_mut(write.cell.as_str());
            match &write.value {
                CellValue::Text(text) => {
                    cell.set_value(text.as_str());
                }
                CellValue::Number(n) => {
                    let n = n.to_f64().ok_or_else(|| {
                        KatalogError::Precondition(format!(
                            "{n} cannot be stored in cell {}",
                            write.cell
                        ))
                    })?;
                    cell.set_value_number(n);
                }
            }
        }

        umya_spreadsheet::writer::xlsx::write(&book, &self.path).map_err(|e| {
            KatalogError::Precondition(format!(
                "cannot save template {}: {e}",
                self.path.display()
            ))
        })?;
        tracing::debug!(path = %self.path.display(), cells = writes.len(), "invoice written");
        Ok(())
    }
}
