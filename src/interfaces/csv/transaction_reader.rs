use crate::domain::transaction::NewTransaction;
use crate::error::{FinboardError, Result};
use std::io::Read;

/// Reads transaction entries from a CSV source.
///
/// Expected header: `description,amount,currency,date,country`. Whitespace
/// is trimmed and short rows are tolerated; an empty description becomes
/// `None`. Rows are only parsed here, validation happens when they are
/// recorded in a store.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes each row.
    pub fn transactions(self) -> impl Iterator<Item = Result<NewTransaction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(FinboardError::from))
    }
}
