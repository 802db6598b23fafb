/*

    Declare data structs needed to parse probe files.

    - SingleOrVec: a JSON field holding one object or an array
    - BoxDesc: one box, given by corners, center + extent, or points
    - RayDesc: one ray and its [near, far] limit

    @date: 13 Oct, 2025
    @author: Bartu
*/

use serde::de::{self, DeserializeOwned, Deserializer};
use serde_json::Value;

use crate::prelude::*;
use crate::json_parser::{deser_usize, deser_opt_float, deser_opt_vec3, deser_opt_points, deser_vector3, deser_limit};
use crate::bbox::{BBox, BBoxable};
use crate::ray::Ray;


// Root of a probe file
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProbeFile {
    #[serde(rename = "Boxes", default)]
    pub boxes: SingleOrVec<BoxDesc>,
    #[serde(rename = "Rays", default)]
    pub rays: SingleOrVec<RayDesc>,
}


// To handle JSON file having a single <object>
// or an array of <object>s
#[derive(Debug, Clone)]
pub enum SingleOrVec<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T: Clone> SingleOrVec<T>  {
    pub fn all(&self) -> Vec<T> {
        match &self {
            SingleOrVec::Empty => vec![],
            SingleOrVec::Single(t) => vec![t.clone()],
            SingleOrVec::Multiple(vec) => vec.clone(),
        }
    }
}

// Not untagged: errors raised by T (e.g. a box with
// no valid form) must reach the caller as they are
impl<'de, T: DeserializeOwned> Deserialize<'de> for SingleOrVec<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(SingleOrVec::Empty),
            Value::Array(items) => items
                .into_iter()
                .map(|v| T::deserialize(v).map_err(de::Error::custom))
                .collect::<Result<Vec<T>, D::Error>>()
                .map(SingleOrVec::Multiple),
            v @ Value::Object(_) => T::deserialize(v)
                .map(SingleOrVec::Single)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "Expected an object or an array of objects, got {}", other
            ))),
        }
    }
}

impl<T> Default for SingleOrVec<T> {
    fn default() -> Self {
        SingleOrVec::Empty
    }
}


// How the corners of a box are given in the file
#[derive(Debug, Clone, PartialEq)]
pub enum BoxShape {
    Corners { min: Vector3, max: Vector3 },
    CenterExtent { center: Vector3, extent: Vector3 },
    Points(Vec<Vector3>),
}

// Scale is applied before Translate, both are optional
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDesc {
    pub _id: usize,
    pub shape: BoxShape,
    pub scale: Option<Float>,
    pub translate: Option<Vector3>,
}

impl<'de> Deserialize<'de> for BoxDesc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(deserialize_with = "deser_usize")]
            _id: usize,
            #[serde(rename = "Min", default, deserialize_with = "deser_opt_vec3")]
            min: Option<Vector3>,
            #[serde(rename = "Max", default, deserialize_with = "deser_opt_vec3")]
            max: Option<Vector3>,
            #[serde(rename = "Center", default, deserialize_with = "deser_opt_vec3")]
            center: Option<Vector3>,
            #[serde(rename = "Extent", default, deserialize_with = "deser_opt_vec3")]
            extent: Option<Vector3>,
            #[serde(rename = "Points", default, deserialize_with = "deser_opt_points")]
            points: Option<Vec<Vector3>>,
            #[serde(rename = "Scale", default, deserialize_with = "deser_opt_float")]
            scale: Option<Float>,
            #[serde(rename = "Translate", default, deserialize_with = "deser_opt_vec3")]
            translate: Option<Vector3>,
        }

        let helper = Helper::deserialize(deserializer)?;
        let shape = match (helper.min, helper.max, helper.center, helper.extent, helper.points) {
            (Some(min), Some(max), None, None, None) => BoxShape::Corners { min, max },
            (None, None, Some(center), Some(extent), None) => BoxShape::CenterExtent { center, extent },
            (None, None, None, None, Some(points)) => BoxShape::Points(points),
            _ => return Err(de::Error::custom(format!(
                "Box {} needs exactly one of Min+Max, Center+Extent or Points", helper._id
            ))),
        };

        Ok(BoxDesc {
            _id: helper._id,
            shape,
            scale: helper.scale,
            translate: helper.translate,
        })
    }
}

impl BBoxable for BoxDesc {
    fn get_bbox(&self) -> BBox {
        let mut bbox = match &self.shape {
            BoxShape::Corners { min, max } => BBox::from_corners(min, max),
            BoxShape::CenterExtent { center, extent } => BBox::from_center_extent(center, extent),
            BoxShape::Points(points) => BBox::from_points(points),
        };
        if let Some(factor) = self.scale {
            bbox.scale(factor);
        }
        if let Some(offset) = &self.translate {
            bbox.translate(offset);
        }
        bbox
    }
}


#[derive(Debug, Deserialize, Clone)]
pub struct RayDesc {
    #[serde(deserialize_with = "deser_usize")]
    pub _id: usize,
    #[serde(rename = "Origin", deserialize_with = "deser_vector3")]
    pub origin: Vector3,
    #[serde(rename = "Direction", deserialize_with = "deser_vector3")]
    pub direction: Vector3,
    #[serde(rename = "Limit", default, deserialize_with = "deser_limit")]
    pub limit: Interval,
}

impl RayDesc {
    pub fn get_ray(&self) -> Ray {
        Ray::new(self.origin, self.direction)
    }
}
