use super::extract::{read_scorecard, ScoreExtractor};
use super::sanitize::SanitizedScorecard;
use crate::error::FsResult;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// SHA-256 of the image bytes, hex encoded.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Last successful parse per image content, least recently used evicted first.
/// A capacity of zero disables caching.
///
/// Every use stamps the entry with a fresh generation; `recency` orders the
/// stamps, so lookups and evictions stay logarithmic in the capacity.
#[derive(Debug, Clone, Default)]
pub struct ExtractionCache {
    capacity: usize,
    entries: HashMap<String, (u64, SanitizedScorecard)>,
    recency: BTreeMap<u64, String>,
    generation: u64,
    pub hits: u64,
    pub misses: u64,
}

impl ExtractionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn touch(&mut self, key: &str) {
        let generation = self.next_generation();
        if let Some((stamp, _)) = self.entries.get_mut(key) {
            self.recency.remove(&*stamp);
            *stamp = generation;
            self.recency.insert(generation, key.to_string());
        }
    }

    pub fn get(&mut self, key: &str) -> Option<SanitizedScorecard> {
        match self.entries.get(key).map(|(_, card)| card.clone()) {
            Some(card) => {
                self.hits += 1;
                self.touch(key);
                Some(card)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: String, card: SanitizedScorecard) {
        if self.capacity == 0 {
            return;
        }
        if let Some((_, cached)) = self.entries.get_mut(&key) {
            *cached = card;
            self.touch(&key);
            return;
        }

        let generation = self.next_generation();
        self.recency.insert(generation, key.clone());
        self.entries.insert(key, (generation, card));

        while self.entries.len() > self.capacity {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            debug!("Evicting cached extraction {}", &oldest[..12.min(oldest.len())]);
            self.entries.remove(&oldest);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}

/// A provider with a content-addressed cache in front of it. Failures are not cached.
pub struct CachedExtractor<E: ScoreExtractor> {
    provider: E,
    cache: ExtractionCache,
}

impl<E: ScoreExtractor> CachedExtractor<E> {
    pub fn new(provider: E, capacity: usize) -> Self {
        Self {
            provider,
            cache: ExtractionCache::new(capacity),
        }
    }

    pub fn cache(&self) -> &ExtractionCache {
        &self.cache
    }

    pub fn provider(&self) -> &E {
        &self.provider
    }

    pub fn read(&mut self, image: &[u8], mime: &str) -> FsResult<SanitizedScorecard> {
        let key = fingerprint(image);
        if let Some(card) = self.cache.get(&key) {
            debug!("Extraction cache hit for {}", &key[..12]);
            return Ok(card);
        }

        let card = read_scorecard(&mut self.provider, image, mime)?;
        self.cache.insert(key, card.clone());
        Ok(card)
    }
}
