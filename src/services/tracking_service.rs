use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::models::TrackedCoin;

/// Coins currently being watched, keyed by coin name.
///
/// Shared by the dialogue (inserts) and the price watcher (snapshots and
/// removals). Every read-modify-write goes through the one lock.
#[derive(Clone, Default)]
pub struct TrackingStore {
    inner: Arc<Mutex<HashMap<String, TrackedCoin>>>,
}

impl TrackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_tracked(&self, coin_name: &str) -> bool {
        self.inner.lock().await.contains_key(coin_name)
    }

    /// Stores the record, replacing any earlier one for the same coin.
    pub async fn track(&self, coin: TrackedCoin) -> Option<TrackedCoin> {
        let mut map = self.inner.lock().await;
        map.insert(coin.coin_name.clone(), coin)
    }

    /// Removes the record only if it is still the one tracked at `tracked_at`.
    /// Returns it to the first caller; later calls get `None`.
    pub async fn untrack_if(
        &self,
        coin_name: &str,
        tracked_at: DateTime<Utc>,
    ) -> Option<TrackedCoin> {
        let mut map = self.inner.lock().await;
        match map.get(coin_name) {
            Some(current) if current.tracked_at == tracked_at => map.remove(coin_name),
            _ => None,
        }
    }

    pub async fn get(&self, coin_name: &str) -> Option<TrackedCoin> {
        self.inner.lock().await.get(coin_name).cloned()
    }

    pub async fn snapshot(&self) -> Vec<TrackedCoin> {
        let map = self.inner.lock().await;
        let mut coins: Vec<TrackedCoin> = map.values().cloned().collect();
        coins.sort_by(|a, b| a.tracked_at.cmp(&b.tracked_at));
        coins
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
