//! Worker thread for chunk processing
//!
//! Each worker owns a reusable read buffer and two private aggregate tables.
//! It loops: advertise availability (buffer included), receive a chunk on its
//! own input channel, tally every line, reclaim the buffer, repeat. Closure
//! of the input channel while idle is the shutdown signal.

use crossbeam_channel::{select, Receiver, Sender};
use memchr::memchr;

use crate::aggregate::{WorkerTables, MONTH_BUCKET_DIVISOR};
use crate::extract::{NameRule, RecordFormat};

use super::types::{Chunk, Offer};

pub(crate) struct Worker<F, N> {
    id: usize,
    input_rx: Receiver<Chunk>,
    offer_tx: Sender<Offer>,
    buf: Vec<u8>,
    tables: WorkerTables,
    format: F,
    names: N,
    probe_lines: Vec<u64>,
}

impl<F: RecordFormat, N: NameRule> Worker<F, N> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: usize,
        input_rx: Receiver<Chunk>,
        offer_tx: Sender<Offer>,
        chunk_size: usize,
        format: F,
        names: N,
        probe_lines: Vec<u64>,
    ) -> Self {
        Self {
            id,
            input_rx,
            offer_tx,
            buf: Vec::with_capacity(chunk_size),
            tables: WorkerTables::default(),
            format,
            names,
            probe_lines,
        }
    }

    /// Blocking worker loop. Returns the private tables once the input
    /// channel closes, for the post-shutdown merge.
    pub(crate) fn run(mut self) -> WorkerTables {
        let input_rx = self.input_rx.clone();
        let offer_tx = self.offer_tx.clone();

        loop {
            select! {
                recv(input_rx) -> msg => match msg {
                    // The producer only sends after taking an offer, so a
                    // receive here normally means the channel was closed
                    // while idle: drain and exit.
                    Ok(chunk) => self.process_chunk(chunk),
                    Err(_) => break,
                },
                send(offer_tx, Offer { worker_id: self.id, buf: std::mem::take(&mut self.buf) }) -> res => {
                    if res.is_err() {
                        break;
                    }
                    // Offer taken; the next message on our input is the chunk.
                    match input_rx.recv() {
                        Ok(chunk) => self.process_chunk(chunk),
                        Err(_) => break,
                    }
                }
            }
        }

        self.tables
    }

    fn process_chunk(&mut self, chunk: Chunk) {
        let mut rest: &[u8] = &chunk.data;
        let mut line_idx = chunk.line_start;

        while !rest.is_empty() {
            let line = match memchr(b'\n', rest) {
                Some(pos) => {
                    let line = &rest[..pos];
                    rest = &rest[pos + 1..];
                    line
                }
                None => {
                    let line = rest;
                    rest = &rest[rest.len()..];
                    line
                }
            };

            self.process_line(line, line_idx);
            line_idx += 1;
        }

        // The chunk's backing buffer is this worker's own; reclaim it for
        // the next offer.
        self.buf = chunk.data;
    }

    fn process_line(&mut self, line: &[u8], line_idx: u64) {
        let record = match self.format.extract(line) {
            Ok(record) => record,
            Err(err) => {
                eprintln!(
                    "warning: failed to extract line {}: {}",
                    String::from_utf8_lossy(line),
                    err
                );
                return;
            }
        };

        if self.probe_lines.contains(&line_idx) {
            println!(
                "Name: {} at index: {}",
                String::from_utf8_lossy(record.name),
                line_idx
            );
        }

        *self
            .tables
            .month_counts
            .entry(record.time / MONTH_BUCKET_DIVISOR)
            .or_insert(0) += 1;

        let mut name = record.name;
        if let Some(first) = self.names.first(name) {
            name = first;
        }
        // Raw "Last, First" fields that the name rule could not canonicalize
        // are keyed by the last name alone.
        if let Some(pos) = memchr(b',', name) {
            name = &name[..pos];
        }

        let key = String::from_utf8_lossy(name);
        if let Some(count) = self.tables.name_counts.get_mut(key.as_ref()) {
            *count += 1;
        } else {
            self.tables.name_counts.insert(key.into_owned(), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{CommaFirstName, FecRecordFormat};
    use crossbeam_channel::bounded;

    fn test_worker() -> Worker<FecRecordFormat, CommaFirstName> {
        let (_input_tx, input_rx) = bounded(1);
        let (offer_tx, _offer_rx) = bounded(1);
        Worker::new(
            0,
            input_rx,
            offer_tx,
            1024,
            FecRecordFormat,
            CommaFirstName,
            Vec::new(),
        )
    }

    fn fec_line(time: &str, name: &str) -> String {
        format!("C1|N|TER|P|{time}|15C|IND|{name}|CITY|ST|00000")
    }

    #[test]
    fn tallies_lines_in_chunk() {
        let mut worker = test_worker();
        let data = format!(
            "{}\n{}\n{}\n",
            fec_line("201701230300133512", "PEREZ, JOHN A"),
            fec_line("201701240300133512", "SMITH, ANNA"),
            fec_line("201702010300133512", "PEREZ, JOHN A"),
        );
        worker.process_chunk(Chunk {
            data: data.into_bytes(),
            line_start: 0,
        });

        assert_eq!(worker.tables.month_counts[&201701], 2);
        assert_eq!(worker.tables.month_counts[&201702], 1);
        assert_eq!(worker.tables.name_counts["JOHN"], 2);
        assert_eq!(worker.tables.name_counts["ANNA"], 1);
    }

    #[test]
    fn final_line_without_terminator_is_processed() {
        let mut worker = test_worker();
        let data = fec_line("201701230300133512", "PEREZ, JOHN A");
        worker.process_chunk(Chunk {
            data: data.into_bytes(),
            line_start: 0,
        });

        assert_eq!(worker.tables.name_counts["JOHN"], 1);
    }

    #[test]
    fn failed_extraction_is_skipped() {
        let mut worker = test_worker();
        let data = format!("not a record\n{}\n", fec_line("201701230300133512", "PEREZ, JOHN A"));
        worker.process_chunk(Chunk {
            data: data.into_bytes(),
            line_start: 0,
        });

        assert_eq!(worker.tables.month_counts.len(), 1);
        assert_eq!(worker.tables.name_counts.len(), 1);
    }

    #[test]
    fn uncanonicalized_name_is_cut_at_comma() {
        let mut worker = test_worker();
        // No space or content after the comma, so the name rule fails and the
        // raw field is truncated at the comma instead.
        let data = fec_line("201701230300133512", "CONTOSO,");
        worker.process_chunk(Chunk {
            data: data.into_bytes(),
            line_start: 0,
        });

        assert_eq!(worker.tables.name_counts["CONTOSO"], 1);
    }

    #[test]
    fn buffer_is_reclaimed_after_chunk() {
        let mut worker = test_worker();
        let data = fec_line("201701230300133512", "PEREZ, JOHN A").into_bytes();
        let len = data.len();
        worker.process_chunk(Chunk {
            data,
            line_start: 0,
        });

        assert_eq!(worker.buf.len(), len);
    }
}
