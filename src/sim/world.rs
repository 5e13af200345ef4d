//! World generation
//!
//! Platforms ahead of the player, decorative clouds and stars, and the
//! recycling rules that keep their populations fixed as the world scrolls.

use glam::Vec2;
use rand::Rng;

use super::state::{Cloud, Platform, Star};
use crate::consts::*;

/// The platform after `prev_right`, separated by a fresh gap
pub fn next_platform(rng: &mut impl Rng, prev_right: f32) -> Platform {
    let gap = rng.random_range(GAP_MIN..GAP_MAX);
    let w = rng.random_range(PLATFORM_WIDTH_MIN..PLATFORM_WIDTH_MAX);
    Platform {
        x: prev_right + gap,
        w,
    }
}

/// Stage-start layout: the wide home platform at x=0 and four more ahead
pub fn initial_platforms(rng: &mut impl Rng) -> Vec<Platform> {
    let mut platforms = vec![Platform {
        x: 0.0,
        w: FIRST_PLATFORM_WIDTH,
    }];
    while platforms.len() < INITIAL_PLATFORM_COUNT {
        let prev_right = platforms[platforms.len() - 1].right();
        platforms.push(next_platform(rng, prev_right));
    }
    platforms
}

/// A cloud somewhere in view (`initial`) or queued past the right edge
pub fn spawn_cloud(rng: &mut impl Rng, initial: bool) -> Cloud {
    let x = if initial {
        rng.random_range(0.0..VIEW_WIDTH)
    } else {
        VIEW_WIDTH + rng.random_range(0.0..200.0)
    };
    Cloud {
        pos: Vec2::new(x, rng.random_range(40.0..160.0)),
        w: rng.random_range(80.0..160.0),
        speed: rng.random_range(0.1..0.35),
    }
}

pub fn spawn_star(rng: &mut impl Rng) -> Star {
    Star {
        pos: Vec2::new(
            rng.random_range(0.0..VIEW_WIDTH),
            rng.random_range(20.0..200.0),
        ),
        r: rng.random_range(0.8..1.6),
        alpha: rng.random_range(0.3..0.8),
    }
}

/// Drift clouds left, drop the ones fully past the left margin, and refill
/// to the fixed population at the right edge
pub fn update_clouds(clouds: &mut Vec<Cloud>, rng: &mut impl Rng) {
    for cloud in clouds.iter_mut() {
        cloud.pos.x -= cloud.speed;
    }
    clouds.retain(|cloud| cloud.pos.x + cloud.w > CLOUD_EVICT_X);
    while clouds.len() < CLOUD_COUNT {
        clouds.push(spawn_cloud(rng, false));
    }
}
