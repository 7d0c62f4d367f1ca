//! Merging per-worker tables into global totals
//!
//! Workers accumulate into private tables with no locking; once the pool has
//! shut down the tables are merged here. Sums are commutative, so the result
//! is independent of how chunks were interleaved across workers.

use std::collections::HashMap;

/// Dividing an 18-digit FEC image timestamp by this keeps its leading
/// `YYYYMM` digits, i.e. one bucket per calendar month.
pub const MONTH_BUCKET_DIVISOR: u64 = 1_000_000_000_000;

/// Private per-worker aggregation tables. Owned and mutated by exactly one
/// worker while the pool runs; read only after that worker has terminated.
#[derive(Debug, Default)]
pub struct WorkerTables {
    pub month_counts: HashMap<u64, u64>,
    pub name_counts: HashMap<String, u64>,
}

/// Final merged totals for the whole input.
#[derive(Debug)]
pub struct GlobalAggregates {
    pub total_lines: u64,
    pub month_counts: HashMap<u64, u64>,
    pub name_counts: HashMap<String, u64>,
    /// Most frequent name and its count; `None` for empty input. Ties are
    /// broken toward the lexicographically smaller name so the result does
    /// not depend on map iteration order.
    pub most_frequent: Option<(String, u64)>,
}

/// Merge every worker's tables into global totals.
///
/// `total_lines` comes from the producer, not from the tables: lines that
/// failed extraction still count as lines but appear in no table.
pub fn merge(tables: Vec<WorkerTables>, total_lines: u64) -> GlobalAggregates {
    let mut month_counts: HashMap<u64, u64> = HashMap::new();
    let mut name_counts: HashMap<String, u64> = HashMap::new();

    for table in tables {
        for (bucket, count) in table.month_counts {
            *month_counts.entry(bucket).or_insert(0) += count;
        }
        for (name, count) in table.name_counts {
            *name_counts.entry(name).or_insert(0) += count;
        }
    }

    let most_frequent = name_counts
        .iter()
        .max_by(|(a_name, a_count), (b_name, b_count)| {
            a_count.cmp(b_count).then_with(|| b_name.cmp(a_name))
        })
        .map(|(name, count)| (name.clone(), *count));

    GlobalAggregates {
        total_lines,
        month_counts,
        name_counts,
        most_frequent,
    }
}
