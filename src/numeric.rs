/*

    Declare numeric types used throughout this crate.

    WARNING: If you like to use f32 instead of f64
    during computations, you need to change both of these:
    pub type Float = f32;
    pub type Vector3 = Vec3;

    @date: 2 Oct, 2025
    @author: Bartu
*/

use bevy_math::DVec3;
pub type Float = f64; // WARNING: If you want to change it to f32, don't forget to update Vector3
pub type Vector3 = DVec3;

/// Tolerance used by every approximate comparison in the crate.
pub const EPSILON: Float = 1e-8;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < EPSILON
}

/// Infinities only compare equal to themselves here, (inf - inf) is NaN.
pub fn approx_eq(a: Float, b: Float) -> bool {
    a == b || approx_zero(a - b)
}

/// -1 for negative values, +1 otherwise (zero counts as positive).
pub fn sign(x: Float) -> Float {
    if x < 0.0 { -1.0 } else { 1.0 }
}
