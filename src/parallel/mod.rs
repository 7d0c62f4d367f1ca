//! Parallel worker pool
//!
//! A fixed pool of worker threads pulls chunks from the producer through an
//! offer protocol: each idle worker advertises itself on a shared channel,
//! and the producer dispatches the next chunk to whichever worker it receives
//! from that channel. No worker is assigned work before it has signaled
//! readiness, so none is starved or double-assigned.

mod pool;
mod types;
mod worker;

pub use pool::Pool;
pub use types::{Chunk, PoolConfig, DEFAULT_CHUNK_SIZE};

pub(crate) use types::Offer;
