use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::time::Instant;

use linetally::aggregate;
use linetally::cli::Cli;
use linetally::extract::{CommaFirstName, FecRecordFormat};
use linetally::parallel::{Pool, PoolConfig};
use linetally::producer;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("linetally: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let file = File::open(&cli.file).with_context(|| format!("cannot open {}", cli.file))?;

    let config = PoolConfig {
        num_workers: cli.threads.unwrap_or_else(num_cpus::get).max(1),
        chunk_size: cli.chunk_size,
        probe_lines: cli.probe_lines.clone(),
    };

    let pool = Pool::new(&config, FecRecordFormat, CommaFirstName);
    let total_lines = match producer::drive(file, &pool, &config) {
        Ok(total) => total,
        Err(err) => {
            pool.shutdown();
            return Err(err);
        }
    };
    let tables = pool.shutdown();

    println!("Name time: {:?}", start.elapsed());
    println!("Total file line count: {}", total_lines);
    println!("Line count time: {:?}", start.elapsed());

    let aggregates = aggregate::merge(tables, total_lines);

    for (bucket, count) in &aggregates.month_counts {
        println!(
            "Donations per month and year: {} and donation count: {}",
            bucket, count
        );
    }
    println!("Donations time: {:?}", start.elapsed());

    let (name, count) = aggregates
        .most_frequent
        .unwrap_or_else(|| (String::new(), 0));
    println!(
        "The most common first name is: {} and it occurs: {} times.",
        name, count
    );

    let exe = std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "linetally".to_string());
    eprintln!("revision: {}, runtime: {:?}", exe, start.elapsed());

    Ok(())
}
