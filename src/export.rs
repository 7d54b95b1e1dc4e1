//! Semicolon-delimited download of the processed table.
//!
//! Copies the file record by record so every column survives, including
//! ones the report engine never reads. Independent of any selection.

use crate::table::TableError;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Delimiter used by the downloadable export.
pub const EXPORT_DELIMITER: u8 = b';';

/// Default file name offered to the browser.
pub const EXPORT_FILE_NAME: &str = "data.csv";

/// Re-delimit a comma-separated table with `;`. Returns the number of data
/// rows written (header excluded).
pub fn write_semicolon<R: Read, W: Write>(
    input: R,
    output: W,
    origin: &Path,
) -> Result<usize, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(EXPORT_DELIMITER)
        .flexible(true)
        .from_writer(output);

    let mut written = 0usize;
    let mut record = csv::ByteRecord::new();
    loop {
        match rdr.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(TableError::from_csv(origin.to_path_buf(), e)),
        }
        wtr.write_byte_record(&record)
            .map_err(|e| TableError::from_csv(origin.to_path_buf(), e))?;
        written += 1;
    }

    wtr.flush().map_err(|e| TableError::Io {
        path: origin.to_path_buf(),
        source: e,
    })?;

    Ok(written.saturating_sub(1))
}

/// Export the file at `path` into `output`.
pub fn export_file<W: Write>(path: &Path, output: W) -> Result<usize, TableError> {
    let file = File::open(path).map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_semicolon(file, output, path)
}

/// Export the file at `path` into memory (for HTTP download bodies).
pub fn export_bytes(path: &Path) -> Result<Vec<u8>, TableError> {
    let mut out = Vec::new();
    export_file(path, &mut out)?;
    Ok(out)
}
