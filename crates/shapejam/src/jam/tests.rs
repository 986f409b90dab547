use super::*;
use crate::geom2::area;
use nalgebra::vector;

fn square() -> Vec<Pt2> {
    vec![
        vector![0.0, 0.0],
        vector![0.0, 10.0],
        vector![10.0, 10.0],
        vector![10.0, 0.0],
    ]
}

/// Square with the top edge pushed down to a notch at (5, 6).
fn notched() -> Vec<Pt2> {
    vec![
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![5.0, 6.0],
        vector![0.0, 10.0],
    ]
}

#[test]
fn rejects_small_polygons_and_bad_tempo() {
    let cfg = GeomCfg::default();
    let two = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
    assert_eq!(
        jam_in(&two, 1.0, cfg),
        Err(JamError::TooFewVertices { actual: 2 })
    );
    assert_eq!(
        jam_out(&[], 1.0, cfg),
        Err(JamError::TooFewVertices { actual: 0 })
    );
    assert!(matches!(
        jam_in(&square(), 0.0, cfg),
        Err(JamError::InvalidTempo { .. })
    ));
    assert!(matches!(
        jam_out(&square(), f64::NAN, cfg),
        Err(JamError::InvalidTempo { .. })
    ));
}

#[test]
fn erode_shrinks_convex_polygon() {
    let cfg = GeomCfg::default();
    let poly = square();
    let next = jam_in(&poly, 1.0, cfg).unwrap();
    assert_eq!(next.len(), poly.len());
    assert!(area(&next) < area(&poly));
    // Every ear of the square is clean with an inner centroid.
    assert!(next.iter().zip(&poly).all(|(q, p)| q != p));
}

#[test]
fn erode_step_scales_with_quasi_perimeter() {
    let cfg = GeomCfg::default();
    let poly = square();
    let next = jam_in(&poly, 1.0, cfg).unwrap();
    // Vertex (0, 10): ear bbox 10 x 10, step 1/sqrt(40) towards (10/3, 20/3).
    let g = vector![10.0 / 3.0, 20.0 / 3.0];
    let t = 1.0 / 40f64.sqrt();
    let expected = poly[1] * (1.0 - t) + g * t;
    assert!((next[1] - expected).norm() < 1e-12);
}

#[test]
fn large_tempo_clamps_to_centroid() {
    let cfg = GeomCfg::default();
    let next = jam_in(&square(), 1e6, cfg).unwrap();
    assert!((next[1] - vector![10.0 / 3.0, 20.0 / 3.0]).norm() < 1e-12);
}

#[test]
fn dilate_leaves_convex_polygon_alone() {
    let cfg = GeomCfg::default();
    let poly = square();
    assert_eq!(jam_out(&poly, 1.0, cfg).unwrap(), poly);
}

#[test]
fn dilate_grows_notched_polygon_at_the_notch_only() {
    let cfg = GeomCfg::default();
    let poly = notched();
    let next = jam_out(&poly, 1.0, cfg).unwrap();
    assert!(area(&next) > area(&poly));
    for (i, (q, p)) in next.iter().zip(&poly).enumerate() {
        if i == 3 {
            assert!(q.y > p.y, "notch must move up: {q:?}");
        } else {
            assert_eq!(q, p, "vertex {i} must stay");
        }
    }
}

#[test]
fn erode_keeps_notch_vertex() {
    let cfg = GeomCfg::default();
    let poly = notched();
    let next = jam_in(&poly, 1.0, cfg).unwrap();
    assert_eq!(next[3], poly[3]);
    assert!(area(&next) < area(&poly));
}

#[test]
fn locality_guard_freezes_occupied_ear() {
    let cfg = GeomCfg::default();
    // Vertex (2, 2) sits inside the ear of (0, 0).
    let poly = vec![
        vector![0.0, 10.0],
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![2.0, 2.0],
    ];
    for dir in [JamDirection::In, JamDirection::Out] {
        let next = jam(&poly, dir, 1.0, cfg).unwrap();
        assert_eq!(next[1], poly[1]);
    }
}

#[test]
fn repeated_erosion_keeps_shrinking_square() {
    let cfg = GeomCfg::default();
    let mut poly = square();
    let mut last = area(&poly);
    for _ in 0..10 {
        poly = jam_in(&poly, 0.5, cfg).unwrap();
        let a = area(&poly);
        assert!(a < last);
        last = a;
    }
}
