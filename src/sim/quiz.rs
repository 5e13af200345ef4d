//! Arithmetic quiz generation and validation
//!
//! A quiz gates continuing every few bridges and restarting after a death.
//! Generation draws from the simulation RNG so runs stay deterministic.

use rand::Rng;

/// Quiz operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
        }
    }
}

/// A single arithmetic challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub a: i32,
    pub b: i32,
    pub op: Op,
    pub answer: i32,
}

impl Quiz {
    /// Generate a fresh challenge.
    ///
    /// Addition (60% of draws) uses operands in [5,30). Subtraction draws
    /// a in [20,50) and b in [1,19), swapping operands so the result stays
    /// non-negative.
    pub fn generate(rng: &mut impl Rng) -> Self {
        if rng.random::<f32>() < 0.6 {
            let a = rng.random_range(5..30);
            let b = rng.random_range(5..30);
            Self {
                a,
                b,
                op: Op::Add,
                answer: a + b,
            }
        } else {
            let mut a = rng.random_range(20..50);
            let mut b = rng.random_range(1..19);
            if b > a {
                std::mem::swap(&mut a, &mut b);
            }
            Self {
                a,
                b,
                op: Op::Sub,
                answer: a - b,
            }
        }
    }

    /// Question text shown in the overlay
    pub fn prompt(&self) -> String {
        format!("{} {} {} = ?", self.a, self.op.symbol(), self.b)
    }

    /// Exact-match validation: the input must parse as a finite number equal
    /// to the answer. No tolerance.
    pub fn validate(&self, raw: &str) -> bool {
        match raw.trim().parse::<f64>() {
            Ok(v) => v.is_finite() && v == f64::from(self.answer),
            Err(_) => false,
        }
    }
}
