//! Candidate provider for completion suggestions
//!
//! This module provides the trait and implementation for fetching completion
//! candidates such as option names, fixed option values and serial devices.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::options::{self, ArgKind};
use crate::config::CompletionConfig;

/// Trait for providing completion candidates
pub trait CandidateProvider: Send + Sync {
    /// Get option names matching the prefix
    fn options(&self, prefix: &str) -> Vec<String>;

    /// Get fixed values of an argument kind matching the prefix
    fn values(&self, kind: ArgKind, prefix: &str) -> Vec<String>;

    /// Get all known mapping names
    fn map_names(&self) -> Vec<String>;

    /// Get serial device paths matching the prefix
    fn devices(&self, prefix: &str) -> Vec<String>;
}

/// Picocom candidate provider backed by the static option tables
pub struct PicocomCandidateProvider {
    /// Directory scanned for serial devices
    device_dir: PathBuf,
    /// File name prefixes identifying serial devices
    device_prefixes: Vec<String>,
}

impl PicocomCandidateProvider {
    /// Create a new candidate provider
    ///
    /// # Arguments
    /// * `config` - Completion configuration (device directory and name prefixes)
    pub fn new(config: &CompletionConfig) -> Self {
        Self {
            device_dir: config.device_dir.clone(),
            device_prefixes: config.device_prefixes.clone(),
        }
    }

    /// Filter a list of strings by prefix, keeping the original order
    fn filter_by_prefix<'a, I>(items: I, prefix: &str) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        items
            .into_iter()
            .filter(|item| item.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }

    /// List serial devices in the device directory, sorted by path
    fn list_devices(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.device_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(
                    "Cannot list devices in {}: {}",
                    self.device_dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut devices: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                self.device_prefixes
                    .iter()
                    .any(|prefix| name.starts_with(prefix.as_str()))
            })
            .map(|entry| entry.path().to_string_lossy().into_owned())
            .collect();

        devices.sort();
        debug!("Found {} serial device(s)", devices.len());
        devices
    }
}

impl CandidateProvider for PicocomCandidateProvider {
    fn options(&self, prefix: &str) -> Vec<String> {
        Self::filter_by_prefix(options::option_names(), prefix)
    }

    fn values(&self, kind: ArgKind, prefix: &str) -> Vec<String> {
        match kind.fixed_values() {
            Some(values) => Self::filter_by_prefix(values.iter().copied(), prefix),
            None => Vec::new(),
        }
    }

    fn map_names(&self) -> Vec<String> {
        options::MAP_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn devices(&self, prefix: &str) -> Vec<String> {
        let devices = self.list_devices();
        Self::filter_by_prefix(devices.iter().map(String::as_str), prefix)
    }
}
