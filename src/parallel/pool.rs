//! Worker pool construction, dispatch, and shutdown

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread;

use crate::aggregate::WorkerTables;
use crate::extract::{NameRule, RecordFormat};

use super::types::{Chunk, Offer, PoolConfig, INPUT_QUEUE_DEPTH};
use super::worker::Worker;

/// A fixed-size pool of worker threads fed through the offer protocol.
pub struct Pool {
    offer_rx: Receiver<Offer>,
    inputs: Vec<Sender<Chunk>>,
    handles: Vec<thread::JoinHandle<WorkerTables>>,
}

impl Pool {
    /// Start `config.num_workers` workers, each with its own input channel,
    /// private tables, and reusable buffer. Workers advertise readiness on a
    /// shared offer channel bounded by the pool size.
    pub fn new<F, N>(config: &PoolConfig, format: F, names: N) -> Pool
    where
        F: RecordFormat + Clone + Send + 'static,
        N: NameRule + Clone + Send + 'static,
    {
        let (offer_tx, offer_rx) = bounded(config.num_workers);
        let mut inputs = Vec::with_capacity(config.num_workers);
        let mut handles = Vec::with_capacity(config.num_workers);

        for worker_id in 0..config.num_workers {
            let (input_tx, input_rx) = bounded(INPUT_QUEUE_DEPTH);
            let worker = Worker::new(
                worker_id,
                input_rx,
                offer_tx.clone(),
                config.chunk_size,
                format.clone(),
                names.clone(),
                config.probe_lines.clone(),
            );

            inputs.push(input_tx);
            handles.push(thread::spawn(move || worker.run()));
        }

        Pool {
            offer_rx,
            inputs,
            handles,
        }
    }

    /// Block until some worker advertises availability.
    pub(crate) fn next_ready(&self) -> Result<Offer> {
        self.offer_rx
            .recv()
            .map_err(|_| anyhow!("worker pool shut down while input remains"))
    }

    /// Hand a chunk to the worker that offered it.
    pub(crate) fn dispatch(&self, worker_id: usize, chunk: Chunk) -> Result<()> {
        self.inputs[worker_id]
            .send(chunk)
            .map_err(|_| anyhow!("worker {} exited before accepting a chunk", worker_id))
    }

    /// Signal "no more chunks" by closing every worker's input channel, then
    /// wait for all workers to terminate. Returns their private tables for
    /// the merge.
    pub fn shutdown(self) -> Vec<WorkerTables> {
        drop(self.inputs);

        let mut tables = Vec::with_capacity(self.handles.len());
        for (idx, handle) in self.handles.into_iter().enumerate() {
            let table = handle
                .join()
                .unwrap_or_else(|e| panic!("worker thread {} panicked: {:?}", idx, e));
            tables.push(table);
        }
        tables
    }
}
