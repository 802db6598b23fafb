/*

    Given a loaded probe file, run every box query
    over it and collect the results in a report.

    Currently supports:
        - Bounds of all boxes
        - Ordering by signed length
        - Pairwise containment
        - Boolean, interval and detailed ray hits

    @date: Oct 11, 2025
    @author: Bartu
*/

use rayon::prelude::*;

use crate::bbox::{BBox, BBoxable};
use crate::json_structs::ProbeFile;
use crate::ray::{HitRecord, Ray};
use crate::prelude::*;


/// Result of casting one ray against one box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RayBoxHit {
    pub ray_id: usize,
    pub box_id: usize,
    pub hit: bool,
    pub interval: Option<Interval>,
    pub record: Option<HitRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub bounds: BBox,
    pub order: Vec<usize>,
    pub containment: Vec<[usize; 2]>,
    pub hits: Vec<RayBoxHit>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProbeRay {
    pub id: usize,
    pub ray: Ray,
    pub limit: Interval,
}

#[derive(Debug, Clone, Default)]
pub struct ProbeScene {
    pub boxes: Vec<(usize, BBox)>,
    pub rays: Vec<ProbeRay>,
}

impl ProbeScene {

    pub fn new(boxes: Vec<(usize, BBox)>, rays: Vec<ProbeRay>) -> Self {
        Self { boxes, rays }
    }

    pub fn from_file(file: &ProbeFile) -> Self {
        let boxes = file.boxes.all().iter().map(|desc| {
            let bbox = desc.get_bbox();
            if bbox.is_empty() {
                warn!("Box {} is empty or inverted (min {:?}, max {:?}), it contains nothing and is never contained", desc._id, bbox.min, bbox.max);
            }
            (desc._id, bbox)
        }).collect();

        let rays = file.rays.all().iter().map(|desc| {
            let ray = desc.get_ray();
            if ray.is_degenerate() {
                warn!("Ray {} has a zero direction, it is treated as parallel to every slab", desc._id);
            }
            if !desc.limit.validate() {
                warn!("Ray {} has limit {:?} with far < near, it can never hit", desc._id, desc.limit);
            }
            ProbeRay { id: desc._id, ray, limit: desc.limit }
        }).collect();

        Self::new(boxes, rays)
    }

    pub fn bounds(&self) -> BBox {
        let boxes: Vec<BBox> = self.boxes.iter().map(|(_, b)| *b).collect();
        BBox::union_par(&boxes)
    }

    /// Box ids sorted by signed length, stable for equal keys.
    pub fn signed_length_order(&self) -> Vec<usize> {
        let mut sorted = self.boxes.clone();
        sorted.sort_by(|(_, a), (_, b)| a.cmp_signed_length(b));
        sorted.into_iter().map(|(id, _)| id).collect()
    }

    /// Every [outer, inner] pair of distinct boxes where outer contains inner.
    pub fn containment(&self) -> Vec<[usize; 2]> {
        let mut pairs = Vec::new();
        for (i, (outer_id, outer)) in self.boxes.iter().enumerate() {
            for (j, (inner_id, inner)) in self.boxes.iter().enumerate() {
                if i != j && outer.contains(inner) {
                    pairs.push([*outer_id, *inner_id]);
                }
            }
        }
        pairs
    }

    pub fn cast(&self, probe: &ProbeRay) -> Vec<RayBoxHit> {
        self.boxes.iter().map(|(box_id, bbox)| {
            RayBoxHit {
                ray_id: probe.id,
                box_id: *box_id,
                hit: bbox.hit(&probe.ray, &probe.limit),
                interval: bbox.hit_interval(&probe.ray, &probe.limit),
                record: bbox.hit_record(&probe.ray, &probe.limit),
            }
        }).collect()
    }

    pub fn run(&self) -> ProbeReport {
        let span = tracing::span!(tracing::Level::INFO, "probe");
        let _enter = span.enter();

        info!("Probing {} boxes with {} rays...", self.boxes.len(), self.rays.len());

        let bounds = self.bounds();
        debug!("Bounds of all boxes: {:?}", bounds);

        // Rays only read the boxes, so they are cast in parallel
        let hits: Vec<RayBoxHit> = self.rays
            .par_iter()
            .flat_map_iter(|probe| self.cast(probe))
            .collect();

        let n_hits = hits.iter().filter(|h| h.hit).count();
        info!("{} of {} ray/box pairs hit", n_hits, hits.len());

        ProbeReport {
            bounds,
            order: self.signed_length_order(),
            containment: self.containment(),
            hits,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_parser::parse_probe_str;

    fn scene() -> ProbeScene {
        let file = parse_probe_str(r#"{
            "Boxes": [
                { "_id": "1", "Min": "-1 -1 -1", "Max": "1 1 1" },
                { "_id": "2", "Center": "0 0 0", "Extent": "1 1 1" },
                { "_id": "3", "Points": "2 4 6  3 5 7" }
            ],
            "Rays": [
                { "_id": "1", "Origin": "0 0 5", "Direction": "0 0 -1", "Limit": "0 1e9" },
                { "_id": "2", "Origin": "5 0 0", "Direction": "1 0 0", "Limit": "0 1e9" }
            ]
        }"#).unwrap();
        ProbeScene::from_file(&file)
    }

    #[test]
    fn report_on_small_scene() {
        let report = scene().run();

        assert_eq!(report.bounds, BBox::new([-1.0, -1.0, -1.0], [3.0, 5.0, 7.0]));
        assert_eq!(report.order, vec![1, 2, 3]);
        assert_eq!(report.containment, vec![[1, 2]]);
        assert_eq!(report.hits.len(), 6);

        let top = report.hits.iter().find(|h| h.ray_id == 1 && h.box_id == 1).unwrap();
        assert!(top.hit);
        assert_eq!(top.interval, Some(Interval::new(4.0, 6.0)));
        let rec = top.record.unwrap();
        assert_eq!(rec.ray_t, 4.0);
        assert_eq!(rec.hit_point, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(rec.normal, Vector3::Z);

        let inner = report.hits.iter().find(|h| h.ray_id == 1 && h.box_id == 2).unwrap();
        assert_eq!(inner.record.unwrap().ray_t, 4.5);

        // Second ray points away from everything
        assert!(report.hits.iter().filter(|h| h.ray_id == 2).all(|h| !h.hit && h.record.is_none()));
    }

    #[test]
    fn order_puts_negative_centers_first() {
        let boxes = vec![
            (10, BBox::from_center_extent(&Vector3::new(2.0, 0.0, 0.0), &Vector3::ONE)),
            (20, BBox::from_center_extent(&Vector3::new(-3.0, 0.0, 0.0), &Vector3::ONE)),
            (30, BBox::from_center_extent(&Vector3::new(-1.0, -1.0, 0.0), &Vector3::ONE)),
        ];
        let scene = ProbeScene::new(boxes, vec![]);
        assert_eq!(scene.signed_length_order(), vec![20, 30, 10]);
    }

    #[test]
    fn empty_box_is_left_out_of_containment() {
        let file = parse_probe_str(r#"{
            "Boxes": [
                { "_id": "1", "Min": "-1 -1 -1", "Max": "1 1 1" },
                { "_id": "2", "Points": "" },
                { "_id": "3", "Center": "0 0 0", "Extent": "-1 1 1" }
            ]
        }"#).unwrap();
        let scene = ProbeScene::from_file(&file);
        assert!(scene.boxes[1].1.is_empty());
        assert!(scene.boxes[2].1.is_empty());
        assert!(scene.containment().is_empty());
    }

    #[test]
    fn empty_scene() {
        let report = ProbeScene::default().run();
        assert!(report.bounds.is_empty());
        assert!(report.order.is_empty());
        assert!(report.containment.is_empty());
        assert!(report.hits.is_empty());
    }
}
