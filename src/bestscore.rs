//! Best-score persistence
//!
//! A single non-negative integer in LocalStorage. Absent, corrupt or
//! unavailable storage falls back to 0; the session then tracks the best
//! in memory only and gameplay is never blocked.

/// Stored best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore(pub u32);

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "runner-best";

    /// Parse a stored value; anything unusable counts as no record
    #[allow(dead_code)]
    fn parse(raw: Option<String>) -> Self {
        Self(raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0))
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable; best score is session-only");
            return Self(0);
        };

        Self::parse(storage.get_item(Self::STORAGE_KEY).ok().flatten())
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.0.to_string());
            log::info!("Best score saved: {}", self.0);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self(0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
