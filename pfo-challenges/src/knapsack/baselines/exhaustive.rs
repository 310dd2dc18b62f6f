use crate::knapsack::{Challenge, Solution, MAX_EXHAUSTIVE_ITEMS};
use anyhow::{anyhow, Result};

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    let num_items = challenge.items.len();
    if num_items > MAX_EXHAUSTIVE_ITEMS {
        return Err(anyhow!(
            "Exhaustive search supports at most {} items, got {}",
            MAX_EXHAUSTIVE_ITEMS,
            num_items
        ));
    }

    // (total_gain, subset mask) of the best feasible subset seen so far
    let mut best = (0u64, 0u32);
    'subsets: for mask in 0u32..(1u32 << num_items) {
        let mut total_gain = 0u64;
        let mut total_weight = 0u64;
        for (i, item) in challenge.items.iter().enumerate() {
            if mask >> i & 1 == 0 {
                continue;
            }
            total_weight = match total_weight.checked_add(item.weight) {
                Some(w) if w <= challenge.capacity => w,
                _ => continue 'subsets,
            };
            total_gain = total_gain
                .checked_add(item.gain)
                .ok_or_else(|| anyhow!("Total gain overflows"))?;
        }
        if total_gain > best.0 {
            best = (total_gain, mask);
        }
    }

    let indices = (0..num_items).filter(|&i| best.1 >> i & 1 == 1).collect();
    Ok(Solution::assemble(&challenge.items, indices, best.0))
}
