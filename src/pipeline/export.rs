/// CSV export of the full pixel table.
///
/// The export always covers every pixel, independent of the threshold.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::table::PixelTable;

pub const CSV_HEADER: &str = "x,y,R";

/// Default file name offered in the save dialog.
pub const SUGGESTED_FILE_NAME: &str = "red_intensity_full.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Write the header and one `x,y,R` line per record.
pub fn write_csv<W: Write>(table: &PixelTable, mut out: W) -> Result<(), ExportError> {
    writeln!(out, "{}", CSV_HEADER)?;
    for r in table.records() {
        writeln!(out, "{},{},{}", r.x, r.y, r.intensity)?;
    }
    out.flush()?;
    Ok(())
}

/// Save the table as CSV at `path`. Returns the number of data rows written.
pub fn save_csv(table: &PixelTable, path: &Path) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(table.len())
}
