use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Excel error: {0}")]
    Excel(String),
    #[error("{} has no header row", .0.display())]
    EmptyFile(PathBuf),
    #[error("unsupported file type: '{0}' (expected csv, tsv, xlsx, xls, xlsb or ods)")]
    UnsupportedFormat(String),
}
