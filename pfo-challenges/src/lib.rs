pub mod error;
pub mod knapsack;
