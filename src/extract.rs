//! Record and name extraction
//!
//! The aggregation core only knows two narrow contracts: a [`RecordFormat`]
//! that turns one raw line into a time value and a raw name field, and a
//! [`NameRule`] that derives a canonical first name from the raw name. The
//! built-in implementations parse the FEC individual-contributions dump
//! (pipe-separated `itcont.txt` records).

use anyhow::{anyhow, Context, Result};

/// One successfully extracted record, borrowing from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Numeric time value; for FEC records this is the 18-digit image
    /// timestamp whose leading six digits are `YYYYMM`.
    pub time: u64,
    /// Raw name field, uninterpreted.
    pub name: &'a [u8],
}

/// Turns one raw line into a structured record. Failure is per-line and
/// non-fatal: the caller logs and skips.
pub trait RecordFormat {
    fn extract<'a>(&self, line: &'a [u8]) -> Result<Record<'a>>;
}

/// Derives a canonical first name from a raw name field. `None` means the
/// raw field is used unmodified.
pub trait NameRule {
    fn first<'a>(&self, raw: &'a [u8]) -> Option<&'a [u8]>;
}

/// Pipe-separated FEC contribution records: field 4 is the image timestamp,
/// field 7 the contributor name.
const FEC_TIME_FIELD: usize = 4;
const FEC_NAME_FIELD: usize = 7;

#[derive(Debug, Clone, Copy, Default)]
pub struct FecRecordFormat;

impl RecordFormat for FecRecordFormat {
    fn extract<'a>(&self, line: &'a [u8]) -> Result<Record<'a>> {
        let mut time_field: Option<&[u8]> = None;
        let mut name_field: Option<&[u8]> = None;

        for (idx, field) in line.split(|&b| b == b'|').enumerate() {
            match idx {
                FEC_TIME_FIELD => time_field = Some(field),
                FEC_NAME_FIELD => name_field = Some(field),
                _ => {}
            }
        }

        let time_field = time_field.ok_or_else(|| anyhow!("missing time field"))?;
        let name = name_field.ok_or_else(|| anyhow!("missing name field"))?;

        let time = std::str::from_utf8(time_field)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .with_context(|| {
                format!(
                    "invalid time field: {}",
                    String::from_utf8_lossy(time_field)
                )
            })?;

        Ok(Record { time, name })
    }
}

/// First name from a `LAST, FIRST MIDDLE` raw field: the first token after
/// the comma.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaFirstName;

impl NameRule for CommaFirstName {
    fn first<'a>(&self, raw: &'a [u8]) -> Option<&'a [u8]> {
        let pos = memchr::memchr(b',', raw)?;
        let rest = &raw[pos + 1..];
        let start = rest.iter().position(|&b| b != b' ')?;
        let rest = &rest[start..];
        let end = memchr::memchr(b' ', rest).unwrap_or(rest.len());
        let first = &rest[..end];
        if first.is_empty() {
            None
        } else {
            Some(first)
        }
    }
}
