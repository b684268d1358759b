//! File helpers for recordings and reports.
//!
//! - `load_recording`: read a raw-signal recording (`fps` plus six signals).
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `write_text_file`: write a rendered report (e.g. CSV) to disk.

use crate::config::load_json;
use crate::error::{GaitError, Result};
use crate::signal::RawSignals;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A recorded set of raw signals with its frame rate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub fps: f32,
    #[serde(flatten)]
    pub signals: RawSignals,
}

pub fn load_recording(path: &Path) -> Result<Recording> {
    load_json(path)
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| GaitError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    write_text_file(path, &json)
}

pub fn write_text_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|source| GaitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| GaitError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
