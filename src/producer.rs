//! Producer loop: sequential file reading and chunk dispatch
//!
//! Reads the input once, start to end, carving it into chunks that never
//! break a line. The unconsumed tail of each read is carried over into the
//! next worker's buffer, and every chunk is tagged with the global index of
//! its first line so workers can report against stable positions.

use anyhow::{Context, Result};
use std::io::{ErrorKind, Read};

use crate::parallel::{Chunk, Pool, PoolConfig};
use crate::splitter::{count_terminators, split};

/// Read all of `input`, dispatching chunks to `pool` until end-of-file.
/// Returns the total number of lines in the input.
///
/// Any read error other than an interrupt is fatal and aborts the run; no
/// partial results are reported in that case.
pub fn drive<R: Read>(mut input: R, pool: &Pool, config: &PoolConfig) -> Result<u64> {
    let mut carry: Vec<u8> = Vec::new();
    let mut line_start: u64 = 0;
    let mut terminators: u64 = 0;
    let mut last_byte: Option<u8> = None;

    loop {
        let offer = pool.next_ready()?;
        let mut buf = offer.buf;

        buf.clear();
        buf.extend_from_slice(&carry);
        let head = buf.len();
        buf.resize(config.chunk_size, 0);
        let read = read_uninterrupted(&mut input, &mut buf[head..])
            .context("error reading input file")?;
        buf.truncate(head + read);

        if read == 0 {
            // End of file: whatever is held is the final chunk in full.
            if let Some(&b) = buf.last() {
                last_byte = Some(b);
            }
            terminators += count_terminators(&buf);
            pool.dispatch(
                offer.worker_id,
                Chunk {
                    data: buf,
                    line_start,
                },
            )?;
            break;
        }

        let (complete, remainder) = split(&buf);
        let complete_len = complete.len();
        let chunk_terminators = count_terminators(complete);

        carry.clear();
        carry.extend_from_slice(remainder);
        buf.truncate(complete_len);

        if let Some(&b) = buf.last() {
            last_byte = Some(b);
        }
        terminators += chunk_terminators;
        pool.dispatch(
            offer.worker_id,
            Chunk {
                data: buf,
                line_start,
            },
        )?;

        // The chunk ends on a terminator (or is a degenerate oversized
        // line), so terminators == complete lines dispatched. The line that
        // continues in `carry` belongs to the next chunk.
        line_start += chunk_terminators.max(1);
    }

    // A trailing line without a terminator is still a line.
    let total = match last_byte {
        None => 0,
        Some(b'\n') => terminators,
        Some(_) => terminators + 1,
    };
    Ok(total)
}

fn read_uninterrupted<R: Read>(input: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match input.read(buf) {
            Ok(n) => return Ok(n),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}
