use std::{env, fs, io::ErrorKind};

use anyhow::{ensure, Context};
use tracing_subscriber::prelude::*;

use day18::{parse_homework, snailfish::SnailfishNumber, solve_part1, solve_part2};

const DAY: &str = "Day18";
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

    let input_data: Vec<SnailfishNumber> = parse_homework(&content)
        .with_context(|| format!("failed to parse {}", input_file))?;
    tracing::info!(input_file, numbers = input_data.len(), "loaded input");

    let part1 = solve_part1(&input_data).context("the homework has no numbers to add")?;
    println!("{}", part1);

    let part2 = solve_part2(&input_data).context("the homework needs at least two numbers")?;
    println!("{}", part2);

    Ok(())
}

fn self_check() -> anyhow::Result<()> {
    let example = parse_homework(EXAMPLE).context("failed to parse the example")?;

    let part1 = solve_part1(&example);
    ensure!(part1 == Some(4140), "Part 1 self-check failed: expected 4140, got {:?}", part1);

    let part2 = solve_part2(&example);
    ensure!(part2 == Some(3993), "Part 2 self-check failed: expected 3993, got {:?}", part2);

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
