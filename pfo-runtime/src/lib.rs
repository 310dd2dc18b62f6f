use anyhow::{anyhow, Result};
use pfo_challenges::knapsack::{Challenge, Solution, Track};
use pfo_structs::api::OptimizeReq;
use pfo_utils::{dejsonify, read_json_source, seed_from_str};

/// Loads a problem in the `POST /optimizar` request schema and validates it.
pub fn load_challenge(source: &str) -> Result<Challenge> {
    let json = read_json_source(source)?;
    let req = OptimizeReq::from_body(json.as_bytes())?;
    Ok(req.validate()?)
}

pub fn load_solution(source: &str) -> Result<Solution> {
    let json = read_json_source(source)?;
    dejsonify::<Solution>(&json).map_err(|e| anyhow!("Failed to parse solution: {}", e))
}

pub fn compute_solution(challenge: &Challenge, max_cells: usize) -> Result<Solution> {
    Ok(challenge.solve_within_budget(max_cells)?)
}

pub fn verify_solution(challenge: &Challenge, solution: &Solution, max_cells: usize) -> Result<()> {
    challenge.check_table_budget(max_cells)?;
    challenge.verify_solution(solution)
}

pub fn generate_instance(seed: &str, track: &Track) -> Result<OptimizeReq> {
    let challenge = Challenge::generate_instance(&seed_from_str(seed), track)?;
    Ok(OptimizeReq::from(&challenge))
}
