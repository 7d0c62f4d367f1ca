// Core library for the linetally parallel aggregation tool

pub mod aggregate;
pub mod cli;
pub mod extract;
pub mod parallel;
pub mod producer;
pub mod splitter;

use anyhow::Result;
use std::io::Read;

use aggregate::GlobalAggregates;
use extract::{NameRule, RecordFormat};
use parallel::{Pool, PoolConfig};

/// Run the full pipeline over `input`: spawn the pool, drive the producer to
/// end-of-file, shut the pool down, and merge the per-worker tables.
pub fn run<R, F, N>(input: R, config: &PoolConfig, format: F, names: N) -> Result<GlobalAggregates>
where
    R: Read,
    F: RecordFormat + Clone + Send + 'static,
    N: NameRule + Clone + Send + 'static,
{
    let pool = Pool::new(config, format, names);
    let total_lines = match producer::drive(input, &pool, config) {
        Ok(total) => total,
        Err(err) => {
            // Fatal I/O aborts the run; drain the workers but report nothing.
            pool.shutdown();
            return Err(err);
        }
    };
    let tables = pool.shutdown();
    Ok(aggregate::merge(tables, total_lines))
}
