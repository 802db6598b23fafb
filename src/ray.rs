/*

    Ray and the record filled by a successful box hit.

    Directions are NOT required to be normalized, so every t
    reported here is in units of the direction vector.

    @date: Oct, 2025
    @author: Bartu
*/

use crate::prelude::*;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {

    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self {
            origin,
            direction,
        }
    }

    #[inline]
    pub fn at(&self, t: Float) -> Vector3 {
        self.origin + self.direction * t // r(t) = o + dt
    }

    #[inline]
    pub fn squared_distance_at(&self, t: Float) -> Float {
        // Squared distance between ray origin and ray(t) point
        (self.at(t) - self.origin).length_squared()
    }

    #[inline]
    pub fn distance_at(&self, t: Float) -> Float {
        (self.at(t) - self.origin).length()
    }

    /// A zero direction can never cross a slab, callers may want to warn about it.
    pub fn is_degenerate(&self) -> bool {
        approx_zero(self.direction.length_squared())
    }
}


// ray_t is the distance along the ray in direction units
// (t where the ray enters the box), hit_point = ray.at(ray_t)
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct HitRecord {
    pub ray_t: Float,
    pub hit_point: Vector3,
    pub normal: Vector3,
}

impl HitRecord {
    pub fn new(ray_t: Float, hit_point: Vector3, normal: Vector3) -> Self {
        Self {
            ray_t,
            hit_point,
            normal,
        }
    }
}
