//! Registry store: the in-memory inventory and academy registries plus
//! their JSON snapshots on disk.
//!
//! Both registries live in one store object owned by the application root
//! and shared behind a mutex; every mutating operation rewrites both
//! snapshot files. Mutation, persist, and the caller's audit append are
//! deliberately not atomic with each other.

pub mod academy;
pub mod inventory;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::PersonRecord;

pub const INVENTORY_SNAPSHOT: &str = "inventory.json";
pub const ACADEMY_SNAPSHOT: &str = "academy.json";

/// Errors surfaced by registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("record not found")]
    NotFound,
    #[error("{name} is already registered")]
    Conflict {
        name: String,
        existing: PersonRecord,
    },
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error("invalid branch: {0}")]
    InvalidBranch(String),
    #[error("snapshot io error: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-memory registries backed by JSON snapshot files
pub struct RegistryStore {
    inventory_path: PathBuf,
    academy_path: PathBuf,
    inventory: BTreeMap<String, BTreeMap<String, String>>,
    academy: BTreeMap<String, PersonRecord>,
}

impl RegistryStore {
    /// Load both registries from the snapshot files under `data_dir`.
    ///
    /// A missing file is an empty registry. Unparseable JSON is an error;
    /// the caller treats it as fatal at startup.
    pub fn load(data_dir: &Path) -> Result<Self, RegistryError> {
        fs::create_dir_all(data_dir)?;
        let inventory_path = data_dir.join(INVENTORY_SNAPSHOT);
        let academy_path = data_dir.join(ACADEMY_SNAPSHOT);
        let inventory = read_snapshot(&inventory_path)?.unwrap_or_default();
        let academy = read_snapshot(&academy_path)?.unwrap_or_default();
        Ok(Self {
            inventory_path,
            academy_path,
            inventory,
            academy,
        })
    }

    /// Discard the in-memory registries and reload both from disk,
    /// dropping any state that never made it into a snapshot.
    pub fn reload(&mut self) -> Result<(), RegistryError> {
        self.inventory = read_snapshot(&self.inventory_path)?.unwrap_or_default();
        self.academy = read_snapshot(&self.academy_path)?.unwrap_or_default();
        Ok(())
    }

    /// Write both registries to their snapshot files.
    ///
    /// The two files are written sequentially with no transaction spanning
    /// them; a crash between the writes leaves them mutually stale.
    pub(crate) fn persist(&self) -> Result<(), RegistryError> {
        write_snapshot(&self.inventory_path, &self.inventory)?;
        write_snapshot(&self.academy_path, &self.academy)?;
        Ok(())
    }

    pub fn character_count(&self) -> usize {
        self.inventory.len()
    }

    pub fn person_count(&self) -> usize {
        self.academy.len()
    }

    pub(crate) fn inventory_mut(&mut self) -> &mut BTreeMap<String, BTreeMap<String, String>> {
        &mut self.inventory
    }

    pub(crate) fn inventory(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.inventory
    }

    pub(crate) fn academy_mut(&mut self) -> &mut BTreeMap<String, PersonRecord> {
        &mut self.academy
    }

    pub(crate) fn academy(&self) -> &BTreeMap<String, PersonRecord> {
        &self.academy
    }
}

fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RegistryError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<(), RegistryError> {
    let json = serde_json::to_string_pretty(value)?;
    // Write-then-rename so a single snapshot file is never left torn
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Normalize a free-text registry key: trim whitespace, strip surrounding
/// quotes, and title-case it. Idempotent, so keys can be re-normalized at
/// every entry point without drift.
pub fn normalize_key(raw: &str) -> String {
    let stripped = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    title_case(stripped.trim())
}

/// Title-case in the same sense as the original registry keys: a letter is
/// uppercased when the preceding character is not a letter, lowercased
/// otherwise, so `tempest-sun mages` becomes `Tempest-Sun Mages`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
