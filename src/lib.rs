//! Stick Runner - an endless stick-bridge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phase machine, bridging, world recycling)
//! - `renderer`: Canvas-2D rendering of simulation state
//! - `ui`: Overlay/HUD view model derived from simulation state
//! - `audio`: Procedural Web Audio sound effects
//! - `bestscore` / `settings`: LocalStorage-backed persistence
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod bestscore;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use bestscore::BestScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Visible playfield size in CSS pixels
    pub const VIEW_WIDTH: f32 = 640.0;
    pub const VIEW_HEIGHT: f32 = 360.0;

    /// Ground line; platforms sit flush against it
    pub const GROUND_Y: f32 = 300.0;
    pub const PLATFORM_HEIGHT: f32 = 22.0;

    /// Player block edge length
    pub const PLAYER_SIZE: f32 = 34.0;

    /// Gap between consecutive platforms
    pub const GAP_MIN: f32 = 70.0;
    pub const GAP_MAX: f32 = 170.0;
    /// Generated platform width
    pub const PLATFORM_WIDTH_MIN: f32 = 90.0;
    pub const PLATFORM_WIDTH_MAX: f32 = 220.0;
    /// The home platform every stage starts on
    pub const FIRST_PLATFORM_WIDTH: f32 = 200.0;
    /// Platforms laid out at stage start
    pub const INITIAL_PLATFORM_COUNT: usize = 5;

    /// Append a platform once the rightmost edge is this close to the view edge
    pub const PLATFORM_APPEND_MARGIN: f32 = 220.0;
    /// Evict platforms whose right edge has scrolled past this x
    pub const PLATFORM_EVICT_X: f32 = -120.0;

    /// Decorative population targets
    pub const CLOUD_COUNT: usize = 6;
    pub const STAR_COUNT: usize = 30;
    /// Clouds are recycled once their right edge passes this x
    pub const CLOUD_EVICT_X: f32 = -60.0;

    /// Largest frame delta fed to the simulation (ms). rAF gaps after tab
    /// backgrounding would otherwise skip whole phases in one tick.
    pub const MAX_FRAME_DELTA_MS: f32 = 50.0;

    /// Camera shake duration after a missed bridge, in frames
    pub const DEATH_SHAKE_FRAMES: u32 = 12;
}
