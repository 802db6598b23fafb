/*

    Responsible for creating a struct that represents
    ranges from a to b. Rays use it as their [near, far]
    limit and box intersection hands the narrowed range
    back in the same struct.

    See also associated constants of Interval class:
    - EMPTY: (inf, -inf)
    - UNIVERSE: (-inf, inf)
    - NONNEGATIVE: (0, inf)

    @author: Bartu
    @date: Sept 2025

*/

use serde::Serialize;
use smart_default::SmartDefault;

use crate::numeric::{Float};

// min is the near bound, max is the far bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, SmartDefault)]
pub struct Interval {
    #[default = 0.0]
    pub min: Float,
    #[default(Float::INF)]
    pub max: Float,
}

impl Interval {

    pub const EMPTY: Self = Self {
        min: Float::INF,
        max: Float::NEG_INF,
    };

    pub const UNIVERSE: Self = Self {
        min: Float::NEG_INF,
        max: Float::INF,
    };

    pub const NONNEGATIVE: Self = Self {
        min: 0.0,
        max: Float::INF,
    };

    pub fn new(min: Float, max: Float) -> Self {
        Self {
            min,
            max,
        }
    }

    pub fn validate(&self) -> bool {
        self.max >= self.min
    }

    #[inline]
    pub fn near(&self) -> Float {
        self.min
    }

    #[inline]
    pub fn far(&self) -> Float {
        self.max
    }

    pub fn contains(&self, x: Float) -> bool {
        self.min <= x && x <= self.max
    }

    // Shrink towards [t0, t1], used per slab
    #[inline]
    pub fn narrow(&mut self, t0: Float, t1: Float) {
        if t0 > self.min { self.min = t0; }
        if t1 < self.max { self.max = t1; }
    }

}


pub trait FloatConst: Copy {
    const INF: Self;
    const NEG_INF: Self;
}

impl FloatConst for f32 {
    const INF: Self = f32::INFINITY;
    const NEG_INF: Self = f32::NEG_INFINITY;
}

impl FloatConst for f64 {
    const INF: Self = f64::INFINITY;
    const NEG_INF: Self = f64::NEG_INFINITY;
}
