use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabfxError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("No rate data loaded; run `tabfx rates load` first")]
    EmptyRateStore,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TabfxError>;
