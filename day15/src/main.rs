use std::{env, fs, io::ErrorKind};

use anyhow::{ensure, Context};
use tracing_subscriber::prelude::*;

use day15::{grid::Grid, solve_part1, solve_part2};

const DAY: &str = "Day15";
const EXAMPLE: &str = include_str!("../example.txt");

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args: Vec<String> = env::args().collect();
    let mut reversed_args: Vec<_> = args.iter().map(|x| x.as_str()).rev().collect();

    reversed_args
        .pop()
        .context("Expected the executable name to be the first argument, but was missing")?;

    let default_input = format!("data/{}.txt", DAY);
    let input_file = reversed_args.pop().unwrap_or(default_input.as_str());

    self_check()?;

    let content = match fs::read_to_string(input_file) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(input_file, "no puzzle input, only the self-checks ran");
            return Ok(());
        }
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", input_file)),
    };

    let input_data: Grid = content
        .parse()
        .with_context(|| format!("failed to parse {}", input_file))?;
    tracing::info!(input_file, rows = input_data.rows(), cols = input_data.cols(), "loaded input");

    println!("{}", solve_part1(&input_data)?);
    println!("{}", solve_part2(&input_data)?);

    Ok(())
}

fn self_check() -> anyhow::Result<()> {
    let example: Grid = EXAMPLE.parse().context("failed to parse the example")?;

    let part1 = solve_part1(&example)?;
    ensure!(part1 == 40, "Part 1 self-check failed: expected 40, got {}", part1);

    let part2 = solve_part2(&example)?;
    ensure!(part2 == 315, "Part 2 self-check failed: expected 315, got {}", part2);

    tracing::info!(day = DAY, "self-checks passed");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
