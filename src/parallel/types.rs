//! Type definitions for the worker pool

/// Default size of each worker's reusable read buffer.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Depth of each worker's private input channel. One slot is enough for the
/// offer protocol (a worker only advertises when it can accept immediately);
/// a little slack lets the producer hand off without a rendezvous.
pub(crate) const INPUT_QUEUE_DEPTH: usize = 2;

/// A byte range from the input file containing only complete lines, tagged
/// with the 0-based global index of its first line. Exclusively owned by one
/// worker while it is processed; the backing buffer returns to that worker
/// afterwards.
#[derive(Debug)]
pub struct Chunk {
    pub data: Vec<u8>,
    pub line_start: u64,
}

/// An idle worker's advertisement. The worker's reusable buffer travels with
/// the offer so the producer can fill it in place and send it back as a
/// [`Chunk`].
#[derive(Debug)]
pub(crate) struct Offer {
    pub worker_id: usize,
    pub buf: Vec<u8>,
}

/// Configuration for the worker pool and producer loop.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub num_workers: usize,
    /// Capacity of each worker's reusable read buffer.
    pub chunk_size: usize,
    /// Global line indices whose extracted name is printed as a diagnostic.
    pub probe_lines: Vec<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            probe_lines: Vec::new(),
        }
    }
}
