//! Per-session memo of resolved queries.
//!
//! Unbounded by default: a batch session only ever sees as many keys as it
//! has distinct inputs. With a capacity it becomes an LRU.

use std::collections::{HashMap, VecDeque};

use rigscore_core::Resolution;

pub struct ResolutionCache {
    entries: HashMap<String, Resolution>,
    order: VecDeque<String>,
    capacity: Option<usize>,
}

impl ResolutionCache {
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Create a cache holding at most `capacity` entries (`None` = unbounded).
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Look up a query, refreshing its recency when bounded.
    pub fn get(&mut self, query: &str) -> Option<Resolution> {
        let hit = self.entries.get(query).cloned()?;
        if self.capacity.is_some() {
            if let Some(pos) = self.order.iter().position(|k| k == query) {
                if let Some(key) = self.order.remove(pos) {
                    self.order.push_back(key);
                }
            }
        }
        Some(hit)
    }

    pub fn put(&mut self, query: String, resolution: Resolution) {
        if self.entries.contains_key(&query) {
            self.entries.insert(query.clone(), resolution);
            if self.capacity.is_some() {
                self.order.retain(|k| k != &query);
                self.order.push_back(query);
            }
            return;
        }

        if let Some(max) = self.capacity {
            while self.entries.len() >= max {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            self.order.push_back(query.clone());
        }
        self.entries.insert(query, resolution);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
