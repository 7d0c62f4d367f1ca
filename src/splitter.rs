//! Line-boundary splitting for read buffers
//!
//! A read from the input file almost always ends mid-line. `split` carves a
//! buffer into the longest leading prefix that ends on a line boundary and the
//! unconsumed suffix, which the producer carries over into the next read.

/// Buffers shorter than this are treated as the final fragment of the stream
/// and returned whole. Reads are megabyte-sized, so a tiny buffer can only
/// mean the input is nearly exhausted.
pub const FINAL_FRAGMENT_MAX: usize = 256;

/// Split `buf` into (complete lines, remainder).
///
/// The complete part ends with a line terminator (or is the whole buffer in
/// the degenerate cases below), and concatenating both parts reconstructs
/// `buf` exactly.
///
/// Rather than scanning the whole buffer, this searches backward from the end
/// for the last `\n`, widening the search window by doubling until a
/// terminator is found. Lines are short relative to the buffer, so the first
/// probe almost always hits. If the buffer contains no terminator at all it is
/// returned whole (a single line larger than the buffer).
pub fn split(buf: &[u8]) -> (&[u8], &[u8]) {
    if buf.is_empty() {
        return (&[], &[]);
    }
    if buf.len() < FINAL_FRAGMENT_MAX {
        return (buf, &[]);
    }

    let mut window = FINAL_FRAGMENT_MAX;
    loop {
        let probe = window.min(buf.len());
        let tail = &buf[buf.len() - probe..];
        if let Some(pos) = memchr::memrchr(b'\n', tail) {
            let cut = buf.len() - probe + pos + 1;
            return (&buf[..cut], &buf[cut..]);
        }
        if probe == buf.len() {
            return (buf, &[]);
        }
        window *= 2;
    }
}

/// Number of line terminators in `buf`.
pub fn count_terminators(buf: &[u8]) -> u64 {
    memchr::memchr_iter(b'\n', buf).count() as u64
}
