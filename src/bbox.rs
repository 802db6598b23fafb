/*

    Axis Aligned Bounding Box.

    Corners are kept as plain per-axis arrays so the slab loop
    can index x, y, z directly. An empty box is min = +inf,
    max = -inf on every axis, which makes it the identity of
    compare/merge and makes every containment and hit test
    against it fail without a separate flag.

    See slides 03, p.5-6 for the slab method.

    @author: bartu
    @date: 9 Nov, 2025
*/

use rayon::prelude::*;
use std::cmp::Ordering;

use crate::prelude::*;
use crate::ray::{Ray, HitRecord};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, SmartDefault)]
pub struct BBox {
    #[default([Float::INFINITY; 3])]
    pub min: [Float; 3],
    #[default([Float::NEG_INFINITY; 3])]
    pub max: [Float; 3],
}

impl BBox {

    /// Copies both corners verbatim, min <= max is NOT checked.
    pub fn new(min: [Float; 3], max: [Float; 3]) -> Self {
        Self { min, max }
    }

    pub fn from_corners(min: &Vector3, max: &Vector3) -> Self {
        Self::new(min.to_array(), max.to_array())
    }

    /// `extent` is the full diagonal, not the half extent.
    /// A negative extent component gives an inverted box.
    pub fn from_center_extent(center: &Vector3, extent: &Vector3) -> Self {
        let half = *extent * 0.5;
        Self::from_corners(&(*center - half), &(*center + half))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Smallest box around every point, empty if there are none.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Vector3>,
    {
        let mut bbox = Self::empty();
        for p in points {
            bbox.compare(p);
        }
        bbox
    }

    /// Same result as from_points, each rayon task expands its own
    /// box and the partial boxes are merged at the end.
    pub fn from_points_par(points: &[Vector3]) -> Self {
        points
            .par_iter()
            .fold(Self::empty, |mut bbox, p| {
                bbox.compare(p);
                bbox
            })
            .reduce(Self::empty, |mut a, b| {
                a.merge(&b);
                a
            })
    }

    /// Smallest box around all of the given boxes.
    pub fn union_par(boxes: &[BBox]) -> Self {
        boxes
            .par_iter()
            .copied()
            .reduce(Self::empty, |mut a, b| {
                a.merge(&b);
                a
            })
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// True for the cleared state and for any inverted box.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn set_min(&mut self, min: &Vector3) {
        self.min = min.to_array();
    }

    pub fn set_max(&mut self, max: &Vector3) {
        self.max = max.to_array();
    }

    // ================================================================================================
    // Expansion
    // ================================================================================================

    pub fn compare(&mut self, point: &Vector3) {
        self.compare_slice(&point.to_array());
    }

    pub fn compare_slice(&mut self, point: &[Float; 3]) {
        for i in 0..3 {
            if point[i] < self.min[i] { self.min[i] = point[i]; }
            if point[i] > self.max[i] { self.max[i] = point[i]; }
        }
    }

    /// Grow to the smallest box holding both volumes.
    ///
    /// For ordered boxes this is compare(other.min) followed by
    /// compare(other.max). Corners are merged separately so that an
    /// empty `other` leaves this box untouched instead of pulling
    /// its max corner to +inf.
    pub fn merge(&mut self, other: &BBox) {
        for i in 0..3 {
            if other.min[i] < self.min[i] { self.min[i] = other.min[i]; }
            if other.max[i] > self.max[i] { self.max[i] = other.max[i]; }
        }
    }

    /// Raw scale of all six components. The box moves unless it
    /// is centered at the origin, this is not a scale about center.
    pub fn scale(&mut self, factor: Float) {
        for i in 0..3 {
            self.min[i] *= factor;
            self.max[i] *= factor;
        }
    }

    pub fn translate(&mut self, offset: &Vector3) {
        for i in 0..3 {
            self.min[i] += offset[i];
            self.max[i] += offset[i];
        }
    }

    // ================================================================================================
    // Queries
    // ================================================================================================

    #[inline]
    pub fn min(&self) -> Vector3 {
        Vector3::from_array(self.min)
    }

    #[inline]
    pub fn max(&self) -> Vector3 {
        Vector3::from_array(self.max)
    }

    #[inline]
    pub fn extent(&self) -> Vector3 {
        self.max() - self.min()
    }

    #[inline]
    pub fn center(&self) -> Vector3 {
        (self.max() + self.min()) * 0.5
    }

    /// Half of the diagonal, a cheap bounding sphere radius.
    pub fn half_length(&self) -> Float {
        self.extent().length() * 0.5
    }

    /// Squared diagonal halved, no square root taken.
    pub fn half_length2(&self) -> Float {
        self.extent().length_squared() * 0.5
    }

    pub fn length(&self) -> Float {
        self.extent().length()
    }

    pub fn length2(&self) -> Float {
        self.extent().length_squared()
    }

    /// Largest component of the max corner.
    pub fn max3(&self) -> Float {
        self.max[0].max(self.max[1]).max(self.max[2])
    }

    /// Largest component of the min corner.
    pub fn min3(&self) -> Float {
        self.min[0].max(self.min[1]).max(self.min[2])
    }

    /// Length of the center, negative when an odd number of
    /// center components are negative.
    pub fn signed_length(&self) -> Float {
        let c = self.center();
        let negatives = c.to_array().iter().filter(|&&x| x < 0.0).count();
        if negatives % 2 == 1 { -c.length() } else { c.length() }
    }

    pub fn less(&self, other: &BBox) -> bool {
        self.signed_length() < other.signed_length()
    }

    // Total version of less, usable with sort_by
    pub fn cmp_signed_length(&self, other: &BBox) -> Ordering {
        self.signed_length().total_cmp(&other.signed_length())
    }

    /// True if `other` lies within this box on every axis.
    /// Empty or inverted boxes are neither containers nor contained.
    pub fn contains(&self, other: &BBox) -> bool {
        !other.is_empty()
            && (0..3).all(|i| other.min[i] >= self.min[i] && other.max[i] <= self.max[i])
    }

    /// Unit axis of the largest magnitude component of `source`,
    /// pointing the way that component points. Ties go to x, then y, then z.
    pub fn major_axis(source: &Vector3) -> Vector3 {
        let axis = dominant_axis(&source.abs());
        let mut out = Vector3::ZERO;
        out[axis] = sign(source[axis]);
        out
    }

    // ================================================================================================
    // Ray intersection
    // ================================================================================================

    /// True if the ray enters the box within `limit`.
    pub fn hit(&self, ray: &Ray, limit: &Interval) -> bool {
        self.slab_intersect(ray, limit, false).is_some()
    }

    /// Narrowed [t_enter, t_exit] of the ray inside the box.
    ///
    /// Unlike `hit`, a range that collapses to a single t (ray grazing
    /// an edge) still counts as a hit here.
    pub fn hit_interval(&self, ray: &Ray, limit: &Interval) -> Option<Interval> {
        self.slab_intersect(ray, limit, true)
    }

    /// Entry distance, entry point and outward face normal.
    pub fn hit_record(&self, ray: &Ray, limit: &Interval) -> Option<HitRecord> {
        let t = self.slab_intersect(ray, limit, false)?;
        let hit_point = ray.at(t.near());
        Some(HitRecord::new(t.near(), hit_point, self.face_normal(&hit_point)))
    }

    // Recover which face `point` lies on: map the box to [-1, 1]^3 and
    // take the axis that is furthest out.
    fn face_normal(&self, point: &Vector3) -> Vector3 {
        let local = (*point - self.center()) / (self.extent() * 0.5);
        let axis = dominant_axis(&local.abs());
        let mut normal = Vector3::ZERO;
        normal[axis] = sign(local[axis]);
        normal
    }

    fn slab_intersect(&self, ray: &Ray, limit: &Interval, allow_touching: bool) -> Option<Interval> {
        let mut t = *limit;

        for i in 0..3 {
            let d = ray.direction[i];

            // Parallel to both planes of this slab, the origin is assumed
            // to be between them so the axis adds no constraint.
            if !approx_zero(d) {
                let inv_d = 1.0 / d;
                let mut t0 = (self.min[i] - ray.origin[i]) * inv_d;
                let mut t1 = (self.max[i] - ray.origin[i]) * inv_d;
                if inv_d < 0.0 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t.narrow(t0, t1);
            }

            let missed = if allow_touching { t.far() < t.near() } else { t.far() <= t.near() };
            if missed {
                return None;
            }
        }
        Some(t)
    }
}

// First axis (x, y, z order) whose value equals the largest one.
fn dominant_axis(v: &Vector3) -> usize {
    let m = v.max_element();
    (0..3).find(|&i| approx_eq(v[i], m)).unwrap_or(2)
}


pub trait BBoxable {
    fn get_bbox(&self) -> BBox;
}

impl BBoxable for BBox {
    fn get_bbox(&self) -> BBox {
        *self
    }
}

impl BBoxable for Vector3 {
    fn get_bbox(&self) -> BBox {
        BBox::from_corners(self, self)
    }
}

impl BBoxable for [Vector3] {
    fn get_bbox(&self) -> BBox {
        BBox::from_points(self)
    }
}
