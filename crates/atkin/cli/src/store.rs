//! Filesystem image store
//!
//! Writes each persisted image to `<dir>/<name_hint>_<ticks>.png`, where
//! `ticks` is the UTC time in 100ns units since 0001-01-01, and never
//! overwrites an existing file.

use async_trait::async_trait;
use atkin_core::{ImageReference, ImageStore, RenderedImage, SieveError, SieveResult};
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Seconds between 0001-01-01 and the Unix epoch.
const EPOCH_OFFSET_SECS: i64 = 62_135_596_800;

/// Attempts at finding a free file name before giving up
const MAX_NAME_ATTEMPTS: u32 = 16;

/// Errors raised by the filesystem store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no free file name for {name_hint} after {attempts} attempts")]
    NameExhausted { name_hint: String, attempts: u32 },
}

impl From<StoreError> for SieveError {
    fn from(err: StoreError) -> Self {
        SieveError::Storage(err.to_string())
    }
}

/// Image store backed by a local directory
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Public URL of a stored image: `<base_url>/images/<reference>`
    pub fn url_for(base_url: &str, reference: &ImageReference) -> String {
        format!("{}/images/{}", base_url.trim_end_matches('/'), reference)
    }

    async fn write_new(&self, name_hint: &str, bytes: &[u8]) -> Result<String, StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let ticks = ticks(Utc::now());
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = match attempt {
                0 => format!("{name_hint}_{ticks}.png"),
                n => format!("{name_hint}_{ticks}_{n}.png"),
            };
            let path = self.dir.join(&file_name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(StoreError::Io { path, source }),
            };

            write_or_discard(&mut file, &path, bytes).await?;

            debug!(path = %path.display(), bytes = bytes.len(), "image written");
            return Ok(file_name);
        }

        Err(StoreError::NameExhausted {
            name_hint: name_hint.to_string(),
            attempts: MAX_NAME_ATTEMPTS,
        })
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn persist(&self, name_hint: &str, image: &RenderedImage) -> SieveResult<ImageReference> {
        let file_name = self.write_new(name_hint, image.as_bytes()).await?;
        Ok(ImageReference::new(file_name))
    }
}

/// Write `bytes` to a freshly created file, removing the file if the write
/// fails so no truncated image is left behind.
async fn write_or_discard<W>(file: &mut W, path: &Path, bytes: &[u8]) -> Result<(), StoreError>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(bytes).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    if let Err(source) = written {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "failed to remove partial image");
        }
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn ticks(now: DateTime<Utc>) -> i64 {
    (now.timestamp() + EPOCH_OFFSET_SECS) * 10_000_000 + i64::from(now.timestamp_subsec_nanos() / 100)
}
