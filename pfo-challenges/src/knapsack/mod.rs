mod baselines;
use crate::error::{OptimizerError, OptimizerResult};
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Largest instance `compute_exhaustive_baseline` will enumerate (2^20 subsets).
pub const MAX_EXHAUSTIVE_ITEMS: usize = 20;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub weight: u64,
    pub gain: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, weight: u64, gain: u64) -> Self {
        Self {
            name: name.into(),
            weight,
            gain,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub num_items: usize,
    pub max_weight: u64,
    pub max_gain: u64,
    pub budget_percent: u32,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            num_items: 10,
            max_weight: 5000,
            max_gain: 5000,
            budget_percent: 50,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    pub items: Vec<usize>,
    pub selected: Vec<String>,
    pub total_gain: u64,
    pub total_weight: u64,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn assemble(items: &[Item], indices: Vec<usize>, total_gain: u64) -> Self {
        let selected = indices.iter().map(|&i| items[i].name.clone()).collect();
        let total_weight = indices.iter().map(|&i| items[i].weight).sum();
        Self {
            items: indices,
            selected,
            total_gain,
            total_weight,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub capacity: u64,
    pub items: Vec<Item>,
}

/// Exact 0/1-knapsack by dynamic programming.
///
/// Among several optimal subsets the one recovered by walking the table from
/// the last item backwards is returned, with indices in ascending order.
pub fn solve(capacity: u64, items: &[Item]) -> OptimizerResult<Solution> {
    solve_within_budget(capacity, items, usize::MAX)
}

/// Same as [`solve`], but refuses to allocate a table of more than `max_cells` cells.
pub fn solve_within_budget(
    capacity: u64,
    items: &[Item],
    max_cells: usize,
) -> OptimizerResult<Solution> {
    for (index, item) in items.iter().enumerate() {
        if item.weight == 0 {
            return Err(OptimizerError::InvalidWeight {
                index,
                weight: item.weight,
            });
        }
    }
    check_table_budget(capacity, items.len(), max_cells)?;

    // fits in usize, checked above
    let capacity = capacity as usize;
    let table = Table::build(capacity, items)?;

    let mut indices = Vec::new();
    let mut w = capacity;
    for i in (1..=items.len()).rev() {
        if table.get(i, w) != table.get(i - 1, w) {
            indices.push(i - 1);
            w -= items[i - 1].weight as usize;
        }
    }
    indices.reverse();

    Ok(Solution::assemble(
        items,
        indices,
        table.get(items.len(), capacity),
    ))
}

pub fn table_cells(capacity: u64, num_items: usize) -> u128 {
    (num_items as u128 + 1) * (capacity as u128 + 1)
}

pub fn check_table_budget(capacity: u64, num_items: usize, max_cells: usize) -> OptimizerResult<()> {
    let cells = table_cells(capacity, num_items);
    if cells > max_cells as u128 {
        return Err(OptimizerError::TableTooLarge { cells, max_cells });
    }
    Ok(())
}

// Row-major (num_items + 1) x (capacity + 1) table of best gains.
struct Table {
    width: usize,
    cells: Vec<u64>,
}

impl Table {
    fn build(capacity: usize, items: &[Item]) -> OptimizerResult<Self> {
        let width = capacity + 1;
        let mut cells = vec![0u64; width * (items.len() + 1)];
        for (i, item) in items.iter().enumerate() {
            let (prev, row) = cells[i * width..(i + 2) * width].split_at_mut(width);
            for w in 0..width {
                row[w] = prev[w];
                if item.weight <= w as u64 {
                    let with_item = prev[w - item.weight as usize]
                        .checked_add(item.gain)
                        .ok_or(OptimizerError::GainOverflow { index: i })?;
                    if with_item > row[w] {
                        row[w] = with_item;
                    }
                }
            }
        }
        Ok(Self { width, cells })
    }

    fn get(&self, i: usize, w: usize) -> u64 {
        self.cells[i * self.width + w]
    }
}

impl Challenge {
    pub fn new(capacity: u64, items: Vec<Item>) -> Self {
        Self { capacity, items }
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        if track.max_weight == 0 {
            return Err(anyhow!("Track max_weight must be positive"));
        }
        let mut rng = SmallRng::from_seed(*seed);

        let items: Vec<Item> = (0..track.num_items)
            .map(|i| {
                Item::new(
                    format!("item_{}", i),
                    rng.gen_range(1..=track.max_weight),
                    rng.gen_range(0..=track.max_gain),
                )
            })
            .collect();

        let total_weight = items.iter().map(|item| item.weight as u128).sum::<u128>();
        let capacity = (total_weight * track.budget_percent as u128 / 100).min(u64::MAX as u128);

        Ok(Challenge {
            capacity: capacity as u64,
            items,
        })
    }

    pub fn solve(&self) -> OptimizerResult<Solution> {
        solve(self.capacity, &self.items)
    }

    pub fn solve_within_budget(&self, max_cells: usize) -> OptimizerResult<Solution> {
        solve_within_budget(self.capacity, &self.items, max_cells)
    }

    pub fn table_cells(&self) -> u128 {
        table_cells(self.capacity, self.items.len())
    }

    pub fn check_table_budget(&self, max_cells: usize) -> OptimizerResult<()> {
        check_table_budget(self.capacity, self.items.len(), max_cells)
    }

    /// Recomputes `(total_gain, total_weight)` of the selected items.
    pub fn evaluate_solution(&self, solution: &Solution) -> Result<(u64, u64)> {
        let indices: HashSet<usize> = solution.items.iter().cloned().collect();
        if indices.len() != solution.items.len() {
            return Err(anyhow!("Duplicate items selected."));
        }
        if solution.selected.len() != solution.items.len() {
            return Err(anyhow!(
                "Number of selected names ({}) does not match number of items ({})",
                solution.selected.len(),
                solution.items.len()
            ));
        }

        let mut total_gain = 0u64;
        let mut total_weight = 0u64;
        for (&index, name) in solution.items.iter().zip(&solution.selected) {
            let item = self
                .items
                .get(index)
                .ok_or_else(|| anyhow!("Item ({}) is out of bounds", index))?;
            if &item.name != name {
                return Err(anyhow!(
                    "Item ({}) is named '{}', not '{}'",
                    index,
                    item.name,
                    name
                ));
            }
            total_gain = total_gain
                .checked_add(item.gain)
                .ok_or_else(|| anyhow!("Total gain overflows"))?;
            total_weight = total_weight
                .checked_add(item.weight)
                .ok_or_else(|| anyhow!("Total weight overflows"))?;
        }

        if total_weight > self.capacity {
            return Err(anyhow!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight,
                self.capacity
            ));
        }
        Ok((total_gain, total_weight))
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        let (total_gain, total_weight) = self.evaluate_solution(solution)?;
        if total_gain != solution.total_gain {
            return Err(anyhow!(
                "Reported total gain ({}) does not match selected items ({})",
                solution.total_gain,
                total_gain
            ));
        }
        if total_weight != solution.total_weight {
            return Err(anyhow!(
                "Reported total weight ({}) does not match selected items ({})",
                solution.total_weight,
                total_weight
            ));
        }
        let optimal = self.solve()?;
        if total_gain != optimal.total_gain {
            return Err(anyhow!(
                "Total gain ({}) is less than the optimum ({})",
                total_gain,
                optimal.total_gain
            ));
        }
        Ok(())
    }

    pub fn compute_exhaustive_baseline(&self) -> Result<Solution> {
        baselines::exhaustive::solve_challenge(self)
    }
}
