/*!
 * Paragraph caching.
 *
 * Segmentation only needs to rerun when the fragment list or the thresholds
 * change. The cache is keyed by a SHA-256 fingerprint of both, and clones
 * share the same storage.
 */

use std::collections::HashMap;
use std::sync::Arc;
use log::debug;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use super::model::{CaptionFragment, Paragraph};
use super::segmenter::Segmenter;

/// Fingerprint of a fragment list under a segmentation config
pub fn fingerprint(fragments: &[CaptionFragment], segmenter: &Segmenter) -> String {
    let config = segmenter.config();
    let mut hasher = Sha256::new();

    hasher.update(config.pause_threshold_secs.to_le_bytes());
    hasher.update((config.min_paragraph_chars as u64).to_le_bytes());
    hasher.update((config.max_paragraph_chars as u64).to_le_bytes());

    for fragment in fragments {
        hasher.update((fragment.text.len() as u64).to_le_bytes());
        hasher.update(fragment.text.as_bytes());
        hasher.update(fragment.start.to_le_bytes());
        hasher.update(fragment.duration.to_le_bytes());
    }

    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Cache of segmentation results
pub struct ParagraphCache {
    cache: Arc<RwLock<HashMap<String, Arc<Vec<Paragraph>>>>>,
    hits: Arc<RwLock<usize>>,
    misses: Arc<RwLock<usize>>,
    enabled: bool,
}

impl ParagraphCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            enabled,
        }
    }

    /// Return cached paragraphs for `fragments`, segmenting on a miss
    pub fn segment(&self, segmenter: &Segmenter, fragments: &[CaptionFragment]) -> Arc<Vec<Paragraph>> {
        if !self.enabled {
            return Arc::new(segmenter.segment(fragments));
        }

        let key = fingerprint(fragments, segmenter);

        if let Some(paragraphs) = self.cache.read().get(&key) {
            *self.hits.write() += 1;
            debug!("Paragraph cache hit for {}", &key[..12]);
            return paragraphs.clone();
        }

        *self.misses.write() += 1;
        debug!("Paragraph cache miss for {}", &key[..12]);

        let paragraphs = Arc::new(segmenter.segment(fragments));
        self.cache.write().insert(key, paragraphs.clone());
        paragraphs
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;
        debug!("Paragraph cache cleared");
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ParagraphCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Debug for ParagraphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParagraphCache")
            .field("entries", &self.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Clone for ParagraphCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}
