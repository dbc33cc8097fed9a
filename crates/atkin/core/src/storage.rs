//! Persistence capability for rendered images.
//!
//! The engine never touches a filesystem or network. A caller that wants a
//! durable copy passes an [`ImageStore`] to [`crate::SieveEngine::persist`];
//! the store picks the name, writes the bytes and returns an opaque
//! [`ImageReference`] the caller can turn into a URL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

use crate::error::SieveResult;
use crate::types::RenderedImage;

/// Opaque handle returned by an [`ImageStore`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination for rendered images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `image` and return a reference to it.
    ///
    /// `name_hint` is a stable prefix such as `sieve_100`; implementations
    /// are responsible for making the final name unique.
    async fn persist(&self, name_hint: &str, image: &RenderedImage) -> SieveResult<ImageReference>;
}

/// Content-addressed in-process store for tests and embedders.
///
/// References are `<name_hint>_<first 16 hex digits of the BLAKE3 digest>.png`,
/// so persisting the same image twice yields the same reference.
#[derive(Debug, Default)]
pub struct InMemoryImageStore {
    images: RwLock<HashMap<ImageReference, RenderedImage>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, reference: &ImageReference) -> Option<RenderedImage> {
        self.images.read().await.get(reference).cloned()
    }

    pub async fn len(&self) -> usize {
        self.images.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.images.read().await.is_empty()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn persist(&self, name_hint: &str, image: &RenderedImage) -> SieveResult<ImageReference> {
        let digest = image.digest();
        let reference = ImageReference::new(format!("{name_hint}_{}.png", &digest[..16]));
        self.images
            .write()
            .await
            .insert(reference.clone(), image.clone());
        Ok(reference)
    }
}
