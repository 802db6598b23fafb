/*

    Provide utilities to parse probe files (JSON).

    This format currently assumes:
        - Numbers may be given as is or wrapped in quotes e.g. "6"
        - Vector3 fields are either "<a> <a> <a>" or [<a>, <a>, <a>]
          where <a> is integer or float
        - Point lists are a single string of whitespace separated
          floats, three per point

    e.g. in a probe file both
    "Scale": "0.5" and "Scale": 0.5
    work as Scale: Float in source code

    @date: 2 Oct, 2025
    @author: bartu
*/

use std::fmt::{self};
use std::marker::PhantomData;
use std::str::FromStr;
use std::fs::File;
use std::io::BufReader;

use serde::{Deserializer};
use serde::de::{self, Visitor, SeqAccess};

use crate::prelude::*;
use crate::json_structs::{ProbeFile};

pub fn parse_probe_json(path: &str) -> Result<ProbeFile, Box<dyn std::error::Error>> {

    let span = tracing::span!(tracing::Level::INFO, "load_probe");
    let _enter = span.enter();

    // Open file
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path);

    // Parse JSON into ProbeFile
    let root: ProbeFile = serde_json::from_reader(reader)?;
    debug!("Loaded {} boxes and {} rays", root.boxes.all().len(), root.rays.all().len());
    Ok(root)
}

pub fn parse_probe_str(s: &str) -> Result<ProbeFile, Box<dyn std::error::Error>> {
    let root: ProbeFile = serde_json::from_str(s)?;
    Ok(root)
}


pub(crate) fn deser_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize usize type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| de::Error::custom("Invalid integer")),
        serde_json::Value::String(s) => s.parse::<usize>()
            .map_err(|_| de::Error::custom("Failed to parse integer from string")),
        t => Err(de::Error::custom(format!("Expected int or string, found {t}"))),
    }
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_f64()
            .map(|v| v as Float)
            .ok_or_else(|| de::Error::custom("Invalid float")),
        serde_json::Value::String(s) => s.parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

// To be used with #[serde(default)], a missing field stays None
pub(crate) fn deser_opt_float<'de, D>(deserializer: D) -> Result<Option<Float>, D::Error>
where
    D: Deserializer<'de>,
{
    deser_float(deserializer).map(Some)
}

pub trait From3<T>: Sized {
    fn new(x: T, y: T, z: T) -> Self;
}

impl From3<f64> for bevy_math::DVec3 {
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z)
    }
}

pub(crate) fn deser_vec3<'de, D, V, F>(deserializer: D) -> Result<V, D::Error>
where
    D: Deserializer<'de>,
    F: Deserialize<'de> + FromStr,
    F::Err: fmt::Display,
    V: From3<F>,
{
    struct Vec3Visitor<V, F>(PhantomData<(V, F)>);

    impl<'de, V, F> Visitor<'de> for Vec3Visitor<V, F>
    where
        F: Deserialize<'de> + FromStr,
        F::Err: fmt::Display,
        V: From3<F>,
    {
        type Value = V;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a Vec3 as a string 'x y z' or an array [x, y, z]")
        }

        // Given "X Y Z"
        fn visit_str<E>(self, value: &str) -> Result<V, E>
        where
            E: de::Error,
        {
            parse_vec3_str(value).map_err(de::Error::custom)
        }

        // Given [X, Y, Z]
        fn visit_seq<A>(self, mut seq: A) -> Result<V, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let x: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let y: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let z: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            if seq.next_element::<F>()?.is_some() {
                return Err(de::Error::custom("Expected only 3 elements in Vec3 array"));
            }
            Ok(V::new(x, y, z))
        }
    }

    deserializer.deserialize_any(Vec3Visitor(PhantomData))
}

pub(crate) fn deser_vector3<'de, D>(deserializer: D) -> Result<Vector3, D::Error>
where
    D: Deserializer<'de>,
{
    deser_vec3::<D, Vector3, Float>(deserializer)
}

pub(crate) fn deser_opt_vec3<'de, D>(deserializer: D) -> Result<Option<Vector3>, D::Error>
where
    D: Deserializer<'de>,
{
    deser_vector3(deserializer).map(Some)
}


pub(crate) fn deser_pair<'de, D, T>(deserializer: D) -> Result<[T; 2], D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    struct Vec2Visitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for Vec2Visitor<T>
    where
        T: Deserialize<'de> + FromStr,
        T::Err: fmt::Display,
    {
        type Value = [T; 2];

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an array of 2 numbers or a string e.g. 'near far'")
        }

        fn visit_str<E>(self, value: &str) -> Result<[T; 2], E>
        where
            E: de::Error,
        {
            let parts: Vec<&str> = value.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(E::custom("Expected 2 components for Vec2 string"));
            }
            let x = parts[0]
                .parse::<T>()
                .map_err(|_| E::custom("Failed parsing first component"))?;
            let y = parts[1]
                .parse::<T>()
                .map_err(|_| E::custom("Failed parsing second component"))?;
            Ok([x, y])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<[T; 2], A::Error>
        where
            A: SeqAccess<'de>,
        {
            let x: T = seq.next_element()?.ok_or_else(|| de::Error::custom("expected 2 elements"))?;
            let y: T = seq.next_element()?.ok_or_else(|| de::Error::custom("expected 2 elements"))?;
            if seq.next_element::<T>()?.is_some() {
                return Err(de::Error::custom("expected only 2 elements"));
            }
            Ok([x, y])
        }
    }

    deserializer.deserialize_any(Vec2Visitor::<T>(PhantomData))
}

// "near far" pair into a ray limit
pub(crate) fn deser_limit<'de, D>(deserializer: D) -> Result<Interval, D::Error>
where
    D: Deserializer<'de>,
{
    let [near, far] = deser_pair::<D, Float>(deserializer)?;
    Ok(Interval::new(near, far))
}

pub(crate) fn deser_opt_points<'de, D>(deserializer: D) -> Result<Option<Vec<Vector3>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_string_vecvec3(&s).map(Some).map_err(de::Error::custom)
}

/// Helper function: parse a string like "25 25 25" into Vector3
fn parse_vec3_str<V, F>(s: &str) -> Result<V, String>
where
    F: FromStr,
    F::Err: fmt::Display,
    V: From3<F>,
{
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("Expected 3 values, got {}", parts.len()));
    }
    let x = parts[0].parse::<F>().map_err(|e| e.to_string())?;
    let y = parts[1].parse::<F>().map_err(|e| e.to_string())?;
    let z = parts[2].parse::<F>().map_err(|e| e.to_string())?;
    Ok(V::new(x, y, z))
}


pub fn parse_string_vecvec3(s: &str) -> Result<Vec<Vector3>, String> {
    let nums: Vec<Float> = s
        .split_whitespace()
        .map(|x| x.parse::<Float>().map_err(|e| e.to_string()))
        .collect::<Result<_, _>>()?;

    if nums.len() % 3 != 0 {
        return Err(format!("Point list length {} is not divisible by 3", nums.len()));
    }

    Ok(nums.chunks_exact(3)
        .map(|chunk| Vector3::new(chunk[0], chunk[1], chunk[2]))
        .collect())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_string_parsing() {
        let v: Vector3 = parse_vec3_str::<Vector3, Float>("1 -2.5 3e2").unwrap();
        assert_eq!(v, Vector3::new(1.0, -2.5, 300.0));
        assert!(parse_vec3_str::<Vector3, Float>("1 2").is_err());
        assert!(parse_vec3_str::<Vector3, Float>("1 2 x").is_err());
    }

    #[test]
    fn point_list_parsing() {
        let pts = parse_string_vecvec3("0 0 0  1 2 3\n-1 4 2").unwrap();
        assert_eq!(pts, vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-1.0, 4.0, 2.0),
        ]);
        assert!(parse_string_vecvec3("1 2 3 4").is_err());
        assert!(parse_string_vecvec3("").unwrap().is_empty());
    }
}
