use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Column '{column}' not found. Available columns: {}", available.join(", "))]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("No contact column selected. Available columns: {}", available.join(", "))]
    NoColumnSelected { available: Vec<String> },
}
