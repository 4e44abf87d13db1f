//! Shape and geometry compliance test helpers.
//!
//! These functions verify the invariants every shape/lattice/boundary
//! combination must satisfy. Reused across the shape and geometry test
//! modules.

use crate::boundary::BoundaryKind;
use crate::geometry::{BoundaryMode, Geometry};
use crate::shape::Shape;
use indexmap::IndexSet;

/// Assert that `coord_to_index` inverts the canonical ordering.
pub fn assert_index_bijective(shape: &Shape) {
    let sites = shape.canonical_sites();
    let unique: IndexSet<_> = sites.iter().collect();
    assert_eq!(unique.len(), sites.len(), "duplicate canonical sites");
    for (i, site) in sites.iter().enumerate() {
        assert_eq!(
            shape.coord_to_index(site).unwrap(),
            i,
            "coord_to_index({site}) != {i}"
        );
        assert_eq!(shape.site(i), Some(*site));
    }
}

/// Assert that the centre and every boundary site are canonical.
pub fn assert_landmarks_canonical(shape: &Shape) {
    assert!(shape.contains(&shape.center()), "center {} not canonical", shape.center());
    let edge = shape.boundaries();
    assert!(!edge.is_empty(), "shape has no boundary sites");
    for site in edge {
        assert!(shape.contains(&site), "boundary site {site} not canonical");
    }
}

/// Assert that overbounds is zero exactly on canonical sites.
pub fn assert_overbounds_zero_inside(shape: &Shape) {
    for site in shape.canonical_sites() {
        assert!(
            shape.overbounds(&site).unwrap().is_zero(),
            "overbounds({site}) non-zero for canonical site"
        );
        for nb in shape.lattice().annulus(&site, 1).unwrap() {
            let ob = shape.overbounds(&nb).unwrap();
            assert_eq!(
                ob.is_zero(),
                shape.contains(&nb),
                "overbounds({nb}) = {ob} disagrees with membership"
            );
        }
    }
}

/// Run every shape-level check.
pub fn run_shape_compliance(shape: &Shape) {
    assert_index_bijective(shape);
    assert_landmarks_canonical(shape);
    assert_overbounds_zero_inside(shape);
}

/// Assert `|annulus(c, r)| == connectivity * r` at every site.
pub fn assert_annulus_sizes(geometry: &Geometry) {
    let k = geometry.connectivity();
    for site in geometry.canonical_sites() {
        for r in 0..3u32 {
            let ring = geometry.annulus(&site, r, BoundaryMode::Ignore).unwrap();
            let expected = if r == 0 { 1 } else { k * r as usize };
            assert_eq!(ring.len(), expected, "annulus({site}, {r})");
        }
    }
}

/// Assert that boundary-applied neighbours are canonical sites or the
/// absorbing sentinel, and that real neighbours are mutual.
pub fn assert_neighbours_symmetric(geometry: &Geometry) {
    for site in geometry.canonical_sites() {
        for nb in geometry.neighbors(&site, BoundaryMode::Apply).unwrap() {
            if nb.is_end_of_world() {
                assert_eq!(geometry.boundary_kind(), BoundaryKind::Absorbing);
                continue;
            }
            assert!(geometry.is_in_bounds(&nb), "{nb} (neighbour of {site}) out of bounds");
            let back = geometry.neighbors(&nb, BoundaryMode::Apply).unwrap();
            assert!(back.contains(&site), "{site} not a neighbour of its neighbour {nb}");
        }
    }
}

/// Assert that periodic geometries give every site a full neighbourhood.
pub fn assert_periodic_complete(geometry: &Geometry) {
    if geometry.boundary_kind() != BoundaryKind::Periodic {
        return;
    }
    for site in geometry.canonical_sites() {
        let nbrs = geometry.neighbors(&site, BoundaryMode::Apply).unwrap();
        assert_eq!(nbrs.len(), geometry.connectivity(), "neighbours of {site}");
    }
}

/// Assert `rel_to_abs(p, displacement(p, q)) == q` for all site pairs.
pub fn assert_displacement_round_trip(geometry: &Geometry) {
    let sites = geometry.canonical_sites();
    for p in &sites {
        for q in &sites {
            let d = geometry.displacement(p, q).unwrap();
            assert_eq!(geometry.rel_to_abs(p, &d).unwrap(), *q, "{p} -> {q} via {d}");
        }
    }
}

/// Run every geometry-level check.
pub fn run_geometry_compliance(geometry: &Geometry) {
    run_shape_compliance(geometry.shape());
    assert_annulus_sizes(geometry);
    assert_neighbours_symmetric(geometry);
    assert_periodic_complete(geometry);
    assert_displacement_round_trip(geometry);
}
