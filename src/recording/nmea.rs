//! NMEA 0183 position source
//!
//! GPS receivers attached over serial/USB stream NMEA sentences. Only GGA
//! and RMC carry what the recorder needs; everything else is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use super::{RecordingService, TrackerHandle};
use crate::core::Fix;
use crate::store::StoreError;

/// Parse one sentence into a fix
///
/// Returns `None` for other sentence types, bad checksums, and sentences
/// reporting no fix.
pub fn parse_sentence(line: &str) -> Option<Fix> {
    let body = verify_checksum(line.trim())?;
    let fields: Vec<&str> = body.split(',').collect();
    let kind = fields.first()?;
    if kind.len() < 5 {
        return None;
    }

    // Talker ids vary (GP, GN, GL, ...); only the sentence type matters
    match kind.get(kind.len() - 3..)? {
        "GGA" => {
            // 0 = no fix
            if fields.get(6).copied().unwrap_or("0") == "0" {
                return None;
            }
            let lat = coordinate(fields.get(2)?, fields.get(3)?)?;
            let lon = coordinate(fields.get(4)?, fields.get(5)?)?;
            let elevation = fields.get(9).and_then(|v| v.parse().ok());
            Some(Fix::now(lat, lon, elevation))
        }
        "RMC" => {
            if fields.get(2) != Some(&"A") {
                return None;
            }
            let lat = coordinate(fields.get(3)?, fields.get(4)?)?;
            let lon = coordinate(fields.get(5)?, fields.get(6)?)?;
            Some(Fix::now(lat, lon, None))
        }
        _ => None,
    }
}

/// Strip `$` and `*hh`, checking the XOR checksum when present
fn verify_checksum(line: &str) -> Option<&str> {
    let line = line.strip_prefix('$')?;
    match line.split_once('*') {
        Some((body, checksum)) => {
            let expected = u8::from_str_radix(checksum.get(..2)?, 16).ok()?;
            let actual = body.bytes().fold(0u8, |acc, b| acc ^ b);
            (actual == expected).then_some(body)
        }
        None => Some(line),
    }
}

/// `ddmm.mmmm` + hemisphere to signed decimal degrees
fn coordinate(value: &str, hemisphere: &str) -> Option<f64> {
    let raw: f64 = value.parse().ok()?;
    let degrees = (raw / 100.0).trunc();
    let minutes = raw - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;

    match hemisphere {
        "N" | "E" => Some(decimal),
        "S" | "W" => Some(-decimal),
        _ => None,
    }
}

/// Feed fixes from an NMEA device (or file) into a running recorder
///
/// The reader stops at end of input, on a read error, or once the recorder
/// is no longer running.
pub fn spawn_reader(path: &Path, handle: TrackerHandle) -> Result<JoinHandle<()>, StoreError> {
    let file = File::open(path)?;
    let path: PathBuf = path.to_path_buf();

    Ok(thread::spawn(move || {
        log::info!("Reading positions from {}", path.display());
        for line in BufReader::new(file).lines() {
            if !handle.is_running() {
                break;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Position source {} failed: {}", path.display(), e);
                    break;
                }
            };
            if let Some(fix) = parse_sentence(&line)
                && handle.record(fix).is_err()
            {
                break;
            }
        }
        log::debug!("Position reader for {} finished", path.display());
    }))
}
