//! CSV export of crawled products

use crate::output::record::ProductRecord;
use crate::output::{OutputError, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the CSV path for a store: `<dir>/<identifier>_products.csv`
pub fn output_path(dir: &Path, identifier: &str) -> PathBuf {
    dir.join(format!("{}_products.csv", identifier))
}

/// Writes products to a CSV file, replacing any existing file
///
/// The header row is always `product_link,product_title,product_price,product_img`.
/// Rows follow in the order given.
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(OutputError::Empty)` - No records to write
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_products(records: &[ProductRecord], path: &Path) -> OutputResult<()> {
    if records.is_empty() {
        return Err(OutputError::Empty);
    }

    let file = File::create(path)?;
    write_products_to(records, file)
}

/// Writes products as CSV to any writer
pub fn write_products_to<W: Write>(records: &[ProductRecord], writer: W) -> OutputResult<()> {
    if records.is_empty() {
        return Err(OutputError::Empty);
    }

    // serialize() emits the header from the first record's field names
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
