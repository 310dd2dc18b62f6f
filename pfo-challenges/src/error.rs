#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    GainOverflow {
        index: usize,
    },
    InvalidWeight {
        index: usize,
        weight: u64,
    },
    TableTooLarge {
        cells: u128,
        max_cells: usize,
    },
}

impl std::fmt::Display for OptimizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizerError::GainOverflow { index } => write!(
                f,
                "Total gain overflows when including item {}",
                index
            ),
            OptimizerError::InvalidWeight { index, weight } => write!(
                f,
                "Weight '{}' of item {} is invalid. Must be a positive integer",
                weight, index
            ),
            OptimizerError::TableTooLarge { cells, max_cells } => write!(
                f,
                "Problem is too large: dynamic programming table needs {} cells, limit is {}",
                cells, max_cells
            ),
        }
    }
}

impl std::error::Error for OptimizerError {}

pub type OptimizerResult<T> = std::result::Result<T, OptimizerError>;
