use colony_core::{Coordinate, Flags};
use colony_space::{
    BoundaryKind, BoundaryMode, Geometry, GeometryConfig, Lattice, Shape, ShapeKind, SpaceError,
};

fn geometry(lattice: Lattice, kind: ShapeKind, boundary: BoundaryKind) -> Geometry {
    GeometryConfig {
        lattice,
        shape: kind,
        boundary,
    }
    .build()
    .unwrap()
}

#[test]
fn triangular_torus_has_six_distinct_neighbours_everywhere() {
    let g = geometry(
        Lattice::Triangular,
        ShapeKind::Rectangle {
            width: 4,
            height: 4,
        },
        BoundaryKind::Periodic,
    );
    for site in g.canonical_sites() {
        let ns = g.neighbors(&site, BoundaryMode::Apply).unwrap();
        assert_eq!(ns.len(), 6, "at {site}");
        let mut distinct: Vec<_> = ns.iter().map(|n| n.canonical()).collect();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 6, "at {site}");
        for n in &ns {
            assert!(g.is_in_bounds(n));
            assert!(n.has_flag(Flags::PLANAR));
            let back = g.neighbors(n, BoundaryMode::Apply).unwrap();
            assert!(back.contains(&site), "{n} does not see {site}");
        }
    }
}

#[test]
fn modes_disagree_only_at_the_edge() {
    let g = geometry(
        Lattice::Rectangular,
        ShapeKind::Rectangle {
            width: 5,
            height: 5,
        },
        BoundaryKind::Absorbing,
    );
    let corner = Coordinate::planar(0, 0);
    let ignore = g.neighbors(&corner, BoundaryMode::Ignore).unwrap();
    let exclude = g.neighbors(&corner, BoundaryMode::Exclude).unwrap();
    let apply = g.neighbors(&corner, BoundaryMode::Apply).unwrap();
    assert_eq!(ignore.len(), 4);
    assert_eq!(exclude.len(), 2);
    assert_eq!(apply.len(), 4);
    assert_eq!(apply.iter().filter(|c| c.is_end_of_world()).count(), 2);

    let middle = Coordinate::planar(2, 2);
    assert_eq!(
        g.neighbors(&middle, BoundaryMode::Ignore).unwrap(),
        g.neighbors(&middle, BoundaryMode::Apply).unwrap()
    );
}

#[test]
fn arena_drops_off_lattice_neighbours() {
    let g = geometry(
        Lattice::Linear,
        ShapeKind::Line { length: 3 },
        BoundaryKind::Arena,
    );
    let end = Coordinate::planar(0, 2);
    assert_eq!(
        g.neighbors(&end, BoundaryMode::Apply).unwrap().to_vec(),
        vec![Coordinate::planar(0, 1)]
    );
    assert_eq!(g.apply_boundary(&Coordinate::planar(0, 3)).unwrap(), None);
}

#[test]
fn scaled_geometry_keeps_policies() {
    let g = geometry(
        Lattice::Triangular,
        ShapeKind::Hexagon { radius: 2 },
        BoundaryKind::Arena,
    );
    let big = g.clone_at_scale(2.0).unwrap();
    assert_eq!(big.shape().kind(), ShapeKind::Hexagon { radius: 4 });
    assert_eq!(big.boundary_kind(), BoundaryKind::Arena);
    assert_eq!(big.site_count(), 61);
}

#[test]
fn mismatched_lattice_is_rejected() {
    let shape = Shape::line(Lattice::Linear, 4).unwrap();
    assert!(matches!(
        Geometry::new(Lattice::Rectangular, shape, BoundaryKind::Arena),
        Err(SpaceError::IncompatibleLattice { .. })
    ));
}
