use anyhow::{anyhow, Result};
use clap::{arg, ArgMatches, Command};
use pfo_challenges::knapsack::Track;
use pfo_runtime::{compute_solution, generate_instance, load_challenge, load_solution, verify_solution};
use pfo_structs::config::DEFAULT_MAX_TABLE_CELLS;
use pfo_utils::jsonify_pretty;
use std::{fs, path::PathBuf};

fn cli() -> Command {
    let default_track = Track::default();
    Command::new("pfo-runtime")
        .about("Computes, verifies or generates portfolio optimization problems")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compute_solution")
                .about("Computes the optimal selection for a problem")
                .arg(
                    arg!(<PROBLEM> "Problem json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"max-cells" [MAX_CELLS] "Limit on (items + 1) * (capacity + 1)")
                        .default_value(DEFAULT_MAX_TABLE_CELLS.to_string())
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a solution is feasible and optimal")
                .arg(
                    arg!(<PROBLEM> "Problem json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"max-cells" [MAX_CELLS] "Limit on (items + 1) * (capacity + 1)")
                        .default_value(DEFAULT_MAX_TABLE_CELLS.to_string())
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Generates a random problem")
                .arg(arg!(<SEED> "A string used in seed generation").value_parser(clap::value_parser!(String)))
                .arg(
                    arg!(--"num-items" [NUM_ITEMS] "Number of items")
                        .default_value(default_track.num_items.to_string())
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"max-weight" [MAX_WEIGHT] "Item weights are drawn from 1..=MAX_WEIGHT")
                        .default_value(default_track.max_weight.to_string())
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"max-gain" [MAX_GAIN] "Item gains are drawn from 0..=MAX_GAIN")
                        .default_value(default_track.max_gain.to_string())
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--budget [BUDGET] "Capacity as a percentage of the total weight")
                        .default_value(default_track.budget_percent.to_string())
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("compute_solution", sub_m)) => run_compute_solution(sub_m),
        Some(("verify_solution", sub_m)) => run_verify_solution(sub_m),
        Some(("generate_instance", sub_m)) => run_generate_instance(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn required<'a, T: Clone + Send + Sync + 'static>(sub_m: &'a ArgMatches, id: &str) -> Result<&'a T> {
    sub_m
        .get_one::<T>(id)
        .ok_or_else(|| anyhow!("Missing argument '{}'", id))
}

fn run_compute_solution(sub_m: &ArgMatches) -> Result<()> {
    let challenge = load_challenge(required::<String>(sub_m, "PROBLEM")?)?;
    let solution = compute_solution(&challenge, *required::<usize>(sub_m, "max-cells")?)?;
    let json = jsonify_pretty(&solution)?;

    match sub_m.get_one::<PathBuf>("output") {
        Some(path) => fs::write(path, json)
            .map_err(|e| anyhow!("Failed to write solution to {}: {}", path.display(), e)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

fn run_verify_solution(sub_m: &ArgMatches) -> Result<()> {
    let challenge = load_challenge(required::<String>(sub_m, "PROBLEM")?)?;
    let solution = load_solution(required::<String>(sub_m, "SOLUTION")?)?;
    verify_solution(
        &challenge,
        &solution,
        *required::<usize>(sub_m, "max-cells")?,
    )
    .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    println!("Solution is valid");
    Ok(())
}

fn run_generate_instance(sub_m: &ArgMatches) -> Result<()> {
    let track = Track {
        num_items: *required::<usize>(sub_m, "num-items")?,
        max_weight: *required::<u64>(sub_m, "max-weight")?,
        max_gain: *required::<u64>(sub_m, "max-gain")?,
        budget_percent: *required::<u32>(sub_m, "budget")?,
    };
    let req = generate_instance(required::<String>(sub_m, "SEED")?, &track)?;
    println!("{}", jsonify_pretty(&req)?);
    Ok(())
}
