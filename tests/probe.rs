use std::path::PathBuf;

use fury_aabb::bbox::BBox;
use fury_aabb::interval::Interval;
use fury_aabb::json_parser::{parse_probe_json, parse_probe_str};
use fury_aabb::numeric::Vector3;
use fury_aabb::probe::ProbeScene;
use fury_aabb::ray::Ray;

fn unit_box() -> BBox {
    BBox::new([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0])
}

#[test]
fn literal_ray_scenarios() {
    let bbox = unit_box();
    let limit = Interval::new(0.0, 1e9);

    let down = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
    let rec = bbox.hit_record(&down, &limit).expect("ray from above hits the top face");
    assert_eq!(rec.ray_t, 4.0);
    assert_eq!(rec.hit_point, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(rec.normal, Vector3::new(0.0, 0.0, 1.0));

    let away = Ray::new(Vector3::new(5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    assert!(!bbox.hit(&away, &limit));

    let inside = Ray::new(Vector3::ZERO, Vector3::new(0.0, 1.0, 0.0));
    assert!(bbox.hit(&inside, &limit));
    let t = bbox.hit_interval(&inside, &Interval::UNIVERSE).unwrap();
    assert!(t.min < 0.0);
    assert_eq!(t.max, 1.0);
}

#[test]
fn major_axis_of_mixed_vector() {
    assert_eq!(BBox::major_axis(&Vector3::new(3.0, -5.0, 1.0)), Vector3::new(0.0, -1.0, 0.0));
}

#[test]
fn point_stream_expansion() {
    let points = [
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(-4.0, 0.5, 9.0),
        Vector3::new(0.0, -2.0, 3.5),
    ];
    let mut bbox = BBox::default();
    for p in &points {
        bbox.compare(p);
    }
    assert_eq!(bbox, BBox::new([-4.0, -2.0, 3.0], [1.0, 2.0, 9.0]));
    assert_eq!(bbox, BBox::from_points_par(&points));
    for p in &points {
        assert!(bbox.contains(&BBox::from_corners(p, p)));
    }
}

#[test]
fn probe_file_round_trip_through_disk() {
    let json = r#"{
        "Boxes": { "_id": "7", "Min": [-1, -1, -1], "Max": "1 1 1" },
        "Rays": [
            { "_id": "1", "Origin": "0 0 5", "Direction": "0 0 -1", "Limit": [0, 1e9] },
            { "_id": "2", "Origin": "0 0 0", "Direction": "0 1 0", "Limit": "-inf inf" }
        ]
    }"#;

    let path: PathBuf = std::env::temp_dir().join(format!("fury_aabb_probe_{}.json", std::process::id()));
    std::fs::write(&path, json).unwrap();
    let from_disk = parse_probe_json(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).ok();

    let report = ProbeScene::from_file(&from_disk).run();
    assert_eq!(report, ProbeScene::from_file(&parse_probe_str(json).unwrap()).run());

    assert_eq!(report.bounds, unit_box());
    assert_eq!(report.order, vec![7]);
    assert!(report.containment.is_empty());
    assert_eq!(report.hits.len(), 2);
    assert!(report.hits.iter().all(|h| h.hit));

    let inside = report.hits.iter().find(|h| h.ray_id == 2).unwrap();
    assert_eq!(inside.interval, Some(Interval::new(-1.0, 1.0)));

    let out = serde_json::to_value(&report).unwrap();
    assert_eq!(out["hits"][0]["record"]["ray_t"], 4.0);
}

#[test]
fn missing_file_is_an_error() {
    assert!(parse_probe_json("./does/not/exist.json").is_err());
}

#[test]
fn malformed_vector_is_an_error() {
    assert!(parse_probe_str(r#"{"Rays": [{"_id": "1", "Origin": "0 0", "Direction": "0 0 1"}]}"#).is_err());
}

#[test]
fn incomplete_box_reports_its_missing_form() {
    let err = parse_probe_str(r#"{"Boxes":[{"_id":1,"Min":"0 0 0"}]}"#).unwrap_err();
    assert!(err.to_string().contains("Min+Max"), "{err}");
}

#[test]
fn empty_box_is_never_contained() {
    let unit = unit_box();
    assert!(!unit.contains(&BBox::empty()));
    assert!(!unit.contains(&BBox::new([0.5; 3], [-0.5; 3])));
}
