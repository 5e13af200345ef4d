//! Game state and core simulation types
//!
//! Everything the tick function mutates lives here. External collaborators
//! (renderer, UI shell, audio, persistence) read this state or drain its
//! event list; they never write simulation fields directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::quiz::Quiz;
use super::world;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Standing on a platform, world drifting
    Idle,
    /// Stick growing while the control is held
    Growing,
    /// Stick toppling toward the gap
    Falling,
    /// World translating the landed platform to the screen anchor
    Shifting,
    /// Missed bridge; player dropping into the gap
    FallingDown,
    /// Death fall finished; superseded by the next stage reset
    Fallen,
}

/// What submitting a quiz answer does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    None,
    /// Mid-run checkpoint; a correct answer resumes the run
    Continue,
    /// Post-death gate; a correct answer starts a new run
    Restart,
}

/// Discrete outcomes the shell reacts to (sounds, HUD, persistence).
/// Produced by the tick and command handlers, drained after each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RunStarted,
    Landed { score: u32 },
    CheckpointQuiz,
    Died { score: u32 },
    NewBest { best: u32 },
    AnswerAccepted,
    AnswerRejected,
}

/// A standing surface: left edge and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub w: f32,
}

impl Platform {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
}

/// The player block. `fall_y` tracks the death fall independently of
/// `pos.y` until the stage reset reconciles them.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    pub fall_y: f32,
}

/// The bridging stick, anchored at the current platform's right edge on
/// the platform top line
#[derive(Debug, Clone, Copy, Default)]
pub struct Stick {
    pub anchor: Vec2,
    pub length: f32,
    pub angle: f32,
}

/// Decorative drifting cloud
#[derive(Debug, Clone, Copy)]
pub struct Cloud {
    pub pos: Vec2,
    pub w: f32,
    /// Horizontal drift per frame (px)
    pub speed: f32,
}

/// Decorative background star
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub r: f32,
    pub alpha: f32,
}

/// Complete simulation state, created once per session and mutated in place
#[derive(Debug, Clone)]
pub struct SimState {
    pub running: bool,
    pub paused: bool,
    pub phase: Phase,
    /// Float accumulator; display and comparisons use the floor
    pub score: f32,
    pub best: u32,
    pub quiz_mode: QuizMode,
    pub quiz: Quiz,
    /// Set when the last submitted answer was rejected
    pub quiz_error: bool,
    /// Left-to-right, non-overlapping
    pub platforms: Vec<Platform>,
    /// Index of the platform the player stands on
    pub current_index: usize,
    pub player: Player,
    pub stick: Stick,
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
    /// Camera shake frames remaining
    pub shake: u32,
    pub tuning: Tuning,
    pub time_ticks: u64,
    pub rng: Pcg32,
    /// Outcomes since the last drain
    pub events: Vec<GameEvent>,
}

impl SimState {
    /// Create a fresh session with the given seed. The run does not start
    /// until the first grow command or quiz confirmation.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let quiz = Quiz::generate(&mut rng);
        let mut state = Self {
            running: false,
            paused: false,
            phase: Phase::Idle,
            score: 0.0,
            best: 0,
            quiz_mode: QuizMode::None,
            quiz,
            quiz_error: false,
            platforms: Vec::new(),
            current_index: 0,
            player: Player {
                pos: Vec2::ZERO,
                fall_y: 0.0,
            },
            stick: Stick::default(),
            clouds: Vec::new(),
            stars: Vec::new(),
            shake: 0,
            tuning: Tuning::default(),
            time_ticks: 0,
            rng,
            events: Vec::new(),
        };
        state.reset_stage();
        state
    }

    /// Floored score for display and best comparisons
    pub fn display_score(&self) -> u32 {
        self.score.floor() as u32
    }

    pub fn current_platform(&self) -> &Platform {
        &self.platforms[self.current_index]
    }

    pub fn next_platform(&self) -> Option<&Platform> {
        self.platforms.get(self.current_index + 1)
    }

    /// Fresh platforms, decorations and player placement. Score, best and
    /// quiz gating are untouched.
    pub fn reset_stage(&mut self) {
        self.platforms = world::initial_platforms(&mut self.rng);
        self.current_index = 0;
        self.clouds = (0..CLOUD_COUNT)
            .map(|_| world::spawn_cloud(&mut self.rng, true))
            .collect();
        self.stars = (0..STAR_COUNT).map(|_| world::spawn_star(&mut self.rng)).collect();
        self.shake = 0;
        self.phase = Phase::Idle;
        self.seat_player();
    }

    /// Re-seat the player and stick on the current platform
    pub fn seat_player(&mut self) {
        let platform = self.platforms[self.current_index];
        self.player.pos.x = platform.right() - PLAYER_SIZE;
        self.player.pos.y = GROUND_Y - PLATFORM_HEIGHT - PLAYER_SIZE;
        self.player.fall_y = self.player.pos.y;
        self.stick.anchor = Vec2::new(platform.right(), GROUND_Y - PLATFORM_HEIGHT);
        self.stick.length = 0.0;
        self.stick.angle = 0.0;
    }

    /// Start a brand-new run
    pub fn start_run(&mut self) {
        self.running = true;
        self.paused = false;
        self.score = 0.0;
        self.quiz_mode = QuizMode::None;
        self.quiz_error = false;
        self.reset_stage();
        self.events.push(GameEvent::RunStarted);
    }

    /// Draw a new challenge and clear any stale rejection
    pub fn regenerate_quiz(&mut self) {
        self.quiz = Quiz::generate(&mut self.rng);
        self.quiz_error = false;
    }

    /// Hand the accumulated events to the shell
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
