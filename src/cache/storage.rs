//! File-per-key cache storage
//!
//! Each entry lives in `<cache_dir>/<key>.json` as a self-describing JSON
//! document carrying its format version and expiry. Anything that cannot be
//! read back (missing, expired, corrupt, wrong version) is a miss.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CacheError;

/// Format version written into every entry; bump when `CacheEntry` changes
const FORMAT_VERSION: u32 = 1;

/// Extension used for entry files
const ENTRY_EXTENSION: &str = "json";

type Result<T> = std::result::Result<T, CacheError>;

/// On-disk representation of one cache entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    version: u32,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    data: T,
}

/// Directory-backed cache storage
#[derive(Debug, Clone)]
pub struct CacheStorage {
    dir: PathBuf,
}

impl CacheStorage {
    /// Cache storage at the default location (~/.cache/serprank on Linux)
    pub fn open() -> Result<Self> {
        Ok(Self::open_at(Self::default_dir()?))
    }

    /// Get the default cache directory path
    pub fn default_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoCacheDir)?;
        Ok(cache_base.join("serprank"))
    }

    /// Cache storage rooted at a specific directory.
    ///
    /// Nothing touches the filesystem until the first write.
    pub fn open_at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entry files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, ENTRY_EXTENSION))
    }

    /// Get cached data if present and not expired
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_at(key, Utc::now())
    }

    /// Get cached data as seen at `now`
    pub fn get_at<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        let path = self.entry_path(key);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::debug!("Unreadable cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_slice(&content) {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Corrupt cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        if entry.version != FORMAT_VERSION {
            log::debug!(
                "Cache entry {} has format version {} (expected {})",
                path.display(),
                entry.version,
                FORMAT_VERSION
            );
            return None;
        }

        if now < entry.expires_at {
            Some(entry.data)
        } else {
            None
        }
    }

    /// Store data with a TTL, replacing any existing entry for `key`
    pub fn put<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) -> Result<()> {
        self.put_at(key, data, ttl, Utc::now())
    }

    /// Store data as if written at `now`
    pub fn put_at<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let entry = CacheEntry {
            version: FORMAT_VERSION,
            cached_at: now,
            expires_at,
            data,
        };
        let json = serde_json::to_vec_pretty(&entry)
            .map_err(|e| CacheError::Io(format!("Failed to encode cache entry: {}", e)))?;

        // Write beside the target then rename, so readers never see half a file
        let tmp_path = self
            .dir
            .join(format!("{}.{}.tmp", key, std::process::id()));
        fs::write(&tmp_path, json)
            .map_err(|e| CacheError::Io(format!("Failed to write cache entry: {}", e)))?;
        fs::rename(&tmp_path, self.entry_path(key))
            .map_err(|e| CacheError::Io(format!("Failed to replace cache entry: {}", e)))?;

        Ok(())
    }

    /// Delete every entry regardless of expiry.
    ///
    /// Only entry files and leftover temp files are removed; anything else
    /// sharing the directory is left alone.
    pub fn clear_all(&self) -> Result<ClearStats> {
        let mut entries_removed = 0;

        for path in self.files()? {
            let kind = match file_kind(&path) {
                Some(kind) => kind,
                None => continue,
            };
            match fs::remove_file(&path) {
                Ok(()) if kind == FileKind::Entry => entries_removed += 1,
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(CacheError::Io(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        Ok(ClearStats { entries_removed })
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        self.stats_at(Utc::now())
    }

    /// Get cache statistics as seen at `now`
    pub fn stats_at(&self, now: DateTime<Utc>) -> Result<CacheStats> {
        let mut stats = CacheStats::default();

        for path in self.files()? {
            if file_kind(&path) != Some(FileKind::Entry) {
                continue;
            }
            stats.total_entries += 1;

            let Ok(content) = fs::read(&path) else {
                stats.unreadable_entries += 1;
                continue;
            };
            stats.total_size_bytes += content.len();

            let entry = match serde_json::from_slice::<CacheEntry<IgnoredAny>>(&content) {
                Ok(entry) if entry.version == FORMAT_VERSION => entry,
                _ => {
                    stats.unreadable_entries += 1;
                    continue;
                }
            };

            if now < entry.expires_at {
                stats.valid_entries += 1;
                stats.oldest_entry = Some(match stats.oldest_entry {
                    Some(oldest) => oldest.min(entry.cached_at),
                    None => entry.cached_at,
                });
                stats.newest_entry = Some(match stats.newest_entry {
                    Some(newest) => newest.max(entry.cached_at),
                    None => entry.cached_at,
                });
            } else {
                stats.expired_entries += 1;
            }
        }

        Ok(stats)
    }

    /// All plain files in the cache directory; empty if it does not exist
    fn files(&self) -> Result<Vec<PathBuf>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CacheError::Io(format!(
                    "Failed to list cache dir {}: {}",
                    self.dir.display(),
                    e
                )));
            }
        };

        let mut files = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| CacheError::Io(e.to_string()))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }
}

/// Files this storage writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    /// `<key>.json`
    Entry,
    /// `<key>.<pid>.tmp` left by an interrupted write
    Temp,
}

/// Cache keys are lower-case SHA-256 hex digests
fn is_key(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn file_kind(path: &Path) -> Option<FileKind> {
    let name = path.file_name()?.to_str()?;
    let mut parts = name.split('.');
    let key = parts.next()?;
    if !is_key(key) {
        return None;
    }

    match (parts.next(), parts.next(), parts.next()) {
        (Some(ext), None, None) if ext == ENTRY_EXTENSION => Some(FileKind::Entry),
        (Some(pid), Some("tmp"), None)
            if !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Some(FileKind::Temp)
        }
        _ => None,
    }
}

/// Statistics about cache clear operation
#[derive(Debug, Serialize)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug, Default, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub unreadable_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}
