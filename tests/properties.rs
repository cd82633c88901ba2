use approx::assert_relative_eq;
use em_fields::prelude::*;
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    -5.0f64..5.0
}

fn point() -> impl Strategy<Value = R3> {
    (coordinate(), coordinate(), coordinate()).prop_map(|(x, y, z)| R3::new(x, y, z))
}

fn material() -> impl Strategy<Value = Material> {
    prop_oneof![Just(Material::Conductor), Just(Material::Dielectric)]
}

/// Increasing radii, random materials, zero nominal charge on dielectrics.
fn shell_stack() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<Material>)> {
    proptest::collection::vec((0.1f64..2.0, -10.0f64..10.0, material()), 1..8).prop_map(|layers| {
        let mut radius = 0.0;
        let mut radii = Vec::with_capacity(layers.len());
        let mut charges = Vec::with_capacity(layers.len());
        let mut materials = Vec::with_capacity(layers.len());
        for (step, charge, material) in layers {
            radius += step;
            radii.push(radius);
            charges.push(if material == Material::Conductor { charge } else { 0.0 });
            materials.push(material);
        }
        (radii, charges, materials)
    })
}

fn surface_shape() -> impl Strategy<Value = SurfaceShape> {
    prop_oneof![
        (0.1f64..5.0).prop_map(|radius| SurfaceShape::Sphere { radius }),
        (0.1f64..5.0, 0.1f64..5.0).prop_map(|(radius, height)| SurfaceShape::Cylinder { radius, height }),
        (0.1f64..5.0, 0.1f64..5.0, 0.1f64..5.0)
            .prop_map(|(width, height, depth)| SurfaceShape::Cuboid { width, height, depth }),
    ]
}

proptest! {
    #[test]
    fn prop_superposition(a in point(), b in point(), qa in -5.0f64..5.0, qb in -5.0f64..5.0, p in point()) {
        prop_assume!((p - a).norm() > 0.05 && (p - b).norm() > 0.05);
        let sa: FieldSource = PointCharge::new(a, qa).into();
        let sb: FieldSource = PointCharge::new(b, qb).into();
        let both = field_at(&[sa.clone(), sb.clone()], &p);
        let separate = field_at(&[sa], &p) + field_at(&[sb], &p);
        assert_relative_eq!(both, separate, epsilon = 1.0e-9, max_relative = 1.0e-12);
    }

    #[test]
    fn prop_inverse_square_falloff(p in point(), q in 0.1f64..10.0) {
        prop_assume!(p.norm() > 0.01);
        let cfg = FieldConfig::default();
        let e = field_at(&[PointCharge::new(R3::zeros(), q).into()], &p);
        assert_relative_eq!(e.norm() * p.norm_squared(), cfg.coulomb_constant() * q, max_relative = 1.0e-9);
    }

    #[test]
    fn prop_charge_is_conserved((radii, charges, materials) in shell_stack()) {
        let kappa = vec![1.0; radii.len()];
        let placed = charge_per_surface(&radii, &charges, &materials, &kappa);
        prop_assert_eq!(placed.len(), radii.len());
        let nominal: f64 = charges.iter().sum();
        let total: f64 = placed.iter().sum();
        assert_relative_eq!(total, nominal, epsilon = 1.0e-9);
    }

    #[test]
    fn prop_all_dielectric_stack_is_inert(
        charges in proptest::collection::vec(-10.0f64..10.0, 1..8),
    ) {
        let radii: Vec<f64> = (1..=charges.len()).map(|r| r as f64).collect();
        let materials = vec![Material::Dielectric; charges.len()];
        let kappa = vec![2.0; charges.len()];
        let placed = charge_per_surface(&radii, &charges, &materials, &kappa);
        prop_assert!(placed.iter().all(|q| *q == 0.0));
    }

    #[test]
    fn prop_sample_count_is_exact(shape in surface_shape(), count in 1usize..500, normals in any::<bool>()) {
        let samples = shape.sample_surface_points(count, normals);
        prop_assert_eq!(samples.len(), count);
        prop_assert!(samples.iter().all(|s| s.normal.is_some() == normals));
        prop_assert!(samples.iter().all(|s| shape.contains_point(&s.position, 1.0e-9)));
    }

    #[test]
    fn prop_hollow_sphere_interior_is_field_free(p in point(), sigma in -3.0f64..3.0) {
        let sphere = ChargedSphere::hollow(R3::new(0.5, -0.5, 0.0), 6.0, sigma);
        prop_assume!((p - sphere.position).norm() < 5.9);
        prop_assert_eq!(field_at(&[sphere.into()], &p), R3::zeros());
    }
}

#[test]
fn containment_boundary_is_inclusive() {
    let sphere = SurfaceShape::Sphere { radius: 2.0 };
    assert!(sphere.contains_point(&R3::new(2.0, 0.0, 0.0), 0.0));
    assert!(!sphere.contains_point(&R3::new(2.01, 0.0, 0.0), 0.0));
}

#[test]
fn hollow_and_solid_sphere_scenario() {
    let center = R3::new(1.0, 1.0, 1.0);
    let hollow = ChargedSphere::hollow(center, 1.0, 0.25);
    let q = hollow.total_charge();
    for offset in [R3::x() * 0.5, -R3::x() * 0.5] {
        assert_eq!(field_at(&[hollow.into()], &(center + offset)), R3::zeros());
    }
    let outside = field_at(&[hollow.into()], &(center + R3::x() * 2.0));
    let point = field_at(&[PointCharge::new(center, q).into()], &(center + R3::x() * 2.0));
    assert_relative_eq!(outside, point, max_relative = 1.0e-12);

    let solid = ChargedSphere::solid(center, 1.0, 0.5);
    let half = field_at(&[solid.into()], &(center + R3::y() * 0.5)).norm();
    let surface = field_at(&[solid.into()], &(center + R3::y())).norm();
    assert_relative_eq!(half, 0.5 * surface, max_relative = 1.0e-12);
}

#[test]
fn large_finite_plane_converges_to_infinite_plane() {
    let finite = FinitePlane::new(R3::zeros(), R3::z(), 2000.0, 2000.0, 1.0);
    let infinite = InfinitePlane::new(R3::zeros(), R3::z(), 1.0);
    let p = R3::new(0.1, 0.2, 0.5);
    let ef = field_at(&[finite.into()], &p);
    let ei = field_at(&[infinite.into()], &p);
    assert_relative_eq!(ef, ei, epsilon = 1.0e-3 * ei.norm(), max_relative = 1.0e-3);
}

#[test]
fn enclosed_plane_in_cuboid_scenario() {
    let surface = GaussianSurface::cuboid(R3::zeros(), 4.0, 4.0, 4.0);
    let plane: FieldSource = FinitePlane::new(R3::new(0.2, 0.1, 0.0), R3::x(), 1.0, 2.0, 0.7).into();
    assert!(object_intersects_surface(&surface, &plane));
    let estimate = estimate_enclosed_charge(&surface, &plane);
    assert!(estimate.can_estimate);
    assert_relative_eq!(estimate.enclosed_charge, 0.7 * 2.0, max_relative = 1.0e-9);
}
