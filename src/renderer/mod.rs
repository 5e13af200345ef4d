//! Canvas-2D rendering module
//!
//! Pull-based: paints the current simulation state each frame and never
//! writes simulation fields.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::{Phase, SimState};

const BACKGROUND_COLOR: &str = "#0c111a";
const GROUND_COLOR: &str = "#0f1b2a";
const PLATFORM_COLOR: &str = "#1b2636";
const PLATFORM_INSET_COLOR: &str = "rgba(0,0,0,0.2)";
const STAR_COLOR: &str = "rgba(255,255,255,0.6)";
const CLOUD_COLOR: &str = "rgba(255,255,255,0.08)";
const PLAYER_COLOR: &str = "#34c1ff";
const PLAYER_EYE_COLOR: &str = "#02131f";

/// Paints the playfield onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    /// Paint one frame
    pub fn render(&self, state: &SimState, shake_enabled: bool) {
        let shaking = shake_enabled && state.shake > 0;
        if shaking {
            self.ctx.save();
            let _ = self.ctx.translate(jitter(), jitter());
        }

        self.draw_background(state);
        self.draw_platforms(state);
        self.draw_stick(state);

        match state.phase {
            // While the stick animates, the player is drawn as part of the tower
            Phase::Growing | Phase::Falling => {}
            Phase::FallingDown | Phase::Fallen => {
                self.ctx.set_fill_style_str(PLAYER_COLOR);
                self.ctx.fill_rect(
                    f64::from(state.player.pos.x),
                    f64::from(state.player.fall_y),
                    f64::from(PLAYER_SIZE),
                    f64::from(PLAYER_SIZE),
                );
            }
            _ => self.draw_player(state),
        }

        if shaking {
            self.ctx.restore();
        }
    }

    fn draw_background(&self, state: &SimState) {
        self.ctx.set_fill_style_str(BACKGROUND_COLOR);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        self.ctx.set_fill_style_str(STAR_COLOR);
        for star in &state.stars {
            self.ctx.set_global_alpha(f64::from(star.alpha));
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                f64::from(star.pos.x),
                f64::from(star.pos.y),
                f64::from(star.r),
                0.0,
                TAU,
            );
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);

        self.ctx.set_fill_style_str(CLOUD_COLOR);
        for cloud in &state.clouds {
            self.ctx.begin_path();
            let _ = self.ctx.ellipse(
                f64::from(cloud.pos.x),
                f64::from(cloud.pos.y),
                f64::from(cloud.w) * 0.4,
                f64::from(cloud.w) * 0.18,
                0.0,
                0.0,
                TAU,
            );
            self.ctx.fill();
        }

        self.ctx.set_fill_style_str(GROUND_COLOR);
        let ground = f64::from(GROUND_Y);
        self.ctx
            .fill_rect(0.0, ground + 4.0, self.width, self.height - ground);
    }

    fn draw_platforms(&self, state: &SimState) {
        let top = f64::from(GROUND_Y - PLATFORM_HEIGHT);
        let h = f64::from(PLATFORM_HEIGHT);
        for platform in &state.platforms {
            let (x, w) = (f64::from(platform.x), f64::from(platform.w));
            self.ctx.set_fill_style_str(PLATFORM_COLOR);
            self.ctx.fill_rect(x, top, w, h + 6.0);
            self.ctx.set_fill_style_str(PLATFORM_INSET_COLOR);
            self.ctx.fill_rect(x + 4.0, top + 4.0, w - 8.0, h - 2.0);
        }
    }

    /// The stick and the player are drawn as one rotating "tower" rect so
    /// the block visually topples with its stick
    fn draw_stick(&self, state: &SimState) {
        if state.stick.length <= 0.0 && state.phase == Phase::Idle {
            return;
        }
        let size = f64::from(PLAYER_SIZE);
        let tower = size + f64::from(state.stick.length);

        self.ctx.save();
        let _ = self.ctx.translate(
            f64::from(state.stick.anchor.x),
            f64::from(state.stick.anchor.y),
        );
        let _ = self.ctx.rotate(f64::from(state.stick.angle));
        self.ctx.set_fill_style_str(PLAYER_COLOR);
        self.ctx.fill_rect(-size, -tower, size, tower);
        self.ctx.restore();
    }

    fn draw_player(&self, state: &SimState) {
        let (x, y) = (f64::from(state.player.pos.x), f64::from(state.player.pos.y));
        let size = f64::from(PLAYER_SIZE);
        self.ctx.set_fill_style_str(PLAYER_COLOR);
        self.ctx.fill_rect(x, y, size, size);

        self.ctx.set_fill_style_str(PLAYER_EYE_COLOR);
        self.ctx.fill_rect(x + 9.0, y + 9.0, 8.0, 8.0);
    }
}

/// Cosmetic camera jitter; intentionally outside the seeded simulation RNG
fn jitter() -> f64 {
    js_sys::Math::random() * 4.0 - 2.0
}
