use thiserror::Error;

use crate::trajectories::gps_reader::ParseRowError;

#[derive(Error, Debug)]
pub enum SquishError {
    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV reader error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed GPS row at line {line}: {source}")]
    GpsRow {
        line: u64,
        #[source]
        source: ParseRowError,
    },

    #[error("Invalid reduction parameter: {0}")]
    InvalidParameter(String),

    #[error("Reduction cancelled after {ingested} ingested points")]
    Cancelled { ingested: usize },
}

impl PartialEq for SquishError {
    fn eq(&self, other: &Self) -> bool {
        use SquishError::*;
        match (self, other) {
            // Not comparable: equal when the variant matches
            (Io(_), Io(_)) => true,
            (Csv(_), Csv(_)) => true,

            (
                GpsRow {
                    line: a,
                    source: sa,
                },
                GpsRow {
                    line: b,
                    source: sb,
                },
            ) => a == b && sa == sb,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (Cancelled { ingested: a }, Cancelled { ingested: b }) => a == b,

            _ => false,
        }
    }
}
