//! Decorative Lottie animation fetches.
//!
//! Animations are cosmetic: any failure (transport error, non-200 status,
//! unparseable body) degrades to "no animation" and is only logged. Payloads
//! are fetched per interaction, never cached.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AnimationsConfig;
use crate::error::Result;

/// The four fixed animation placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSlot {
    Sidebar,
    Banner,
    Positive,
    Negative,
}

impl AnimationSlot {
    pub const ALL: [AnimationSlot; 4] = [
        AnimationSlot::Sidebar,
        AnimationSlot::Banner,
        AnimationSlot::Positive,
        AnimationSlot::Negative,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AnimationSlot::Sidebar => "sidebar",
            AnimationSlot::Banner => "banner",
            AnimationSlot::Positive => "positive",
            AnimationSlot::Negative => "negative",
        }
    }

    pub fn from_key(key: &str) -> Option<AnimationSlot> {
        AnimationSlot::ALL.iter().copied().find(|s| s.key() == key)
    }
}

/// Shared fetcher for the remote Lottie payloads.
#[derive(Debug, Clone)]
pub struct AnimationClient {
    client: Client,
    config: AnimationsConfig,
}

impl AnimationClient {
    pub fn new(config: AnimationsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn url_for(&self, slot: AnimationSlot) -> &str {
        match slot {
            AnimationSlot::Sidebar => &self.config.sidebar_url,
            AnimationSlot::Banner => &self.config.banner_url,
            AnimationSlot::Positive => &self.config.positive_url,
            AnimationSlot::Negative => &self.config.negative_url,
        }
    }

    /// Fetch one animation payload. `None` means "render without it".
    pub async fn fetch(&self, slot: AnimationSlot) -> Option<serde_json::Value> {
        if !self.config.enabled {
            return None;
        }

        let url = self.url_for(slot);
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(slot = slot.key(), error = %e, "animation fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                slot = slot.key(),
                status = %response.status(),
                "animation endpoint returned non-success status"
            );
            return None;
        }

        match response.json::<serde_json::Value>().await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(slot = slot.key(), error = %e, "animation payload was not JSON");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_keys_round_trip() {
        for slot in AnimationSlot::ALL {
            assert_eq!(AnimationSlot::from_key(slot.key()), Some(slot));
        }
        assert_eq!(AnimationSlot::from_key("confetti"), None);
    }

    #[test]
    fn disabled_client_never_touches_the_network() {
        let config = AnimationsConfig {
            enabled: false,
            ..AnimationsConfig::default()
        };
        let client = AnimationClient::new(config).unwrap();
        tokio_test::block_on(async {
            assert!(client.fetch(AnimationSlot::Sidebar).await.is_none());
        });
    }
}
