//! Encoding of primitive values.
use dicomize_core::chrono::{Datelike, Timelike};
use dicomize_core::value::{NaiveDate, NaiveTime};
use std::io::{self, Write};

/// Write a date in the DA format `YYYYMMDD`.
/// Returns the number of bytes written.
pub fn encode_date<W>(mut to: W, date: NaiveDate) -> io::Result<usize>
where
    W: Write,
{
    write!(to, "{:04}{:02}{:02}", date.year(), date.month(), date.day())?;
    Ok(8)
}

/// Write a time in the TM format `HHMMSS`,
/// followed by `.FFFFFF` when the time has a sub-second part.
/// Returns the number of bytes written.
pub fn encode_time<W>(mut to: W, time: NaiveTime) -> io::Result<usize>
where
    W: Write,
{
    let (h, m, s) = (time.hour(), time.minute(), time.second());
    match time.nanosecond() / 1_000 {
        0 => {
            write!(to, "{:02}{:02}{:02}", h, m, s)?;
            Ok(6)
        }
        // leap second representation is folded into the last second
        micros => {
            write!(to, "{:02}{:02}{:02}.{:06}", h, m, s, micros.min(999_999))?;
            Ok(13)
        }
    }
}
