// Snow field bounds and wraparound.

use rand::{rngs::StdRng, SeedableRng};
use xmas_core::constants::{SNOW_CEILING, SNOW_HALF_EXTENT};
use xmas_core::*;

fn in_box(field: &SnowField) -> bool {
    field.particles().iter().all(|p| {
        (-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT).contains(&p.position.x)
            && (-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT).contains(&p.position.z)
            && (0.0..SNOW_CEILING).contains(&p.position.y)
    })
}

#[test]
fn spawns_inside_the_box_and_falls() {
    let field = SnowField::new(500, &mut StdRng::seed_from_u64(1));
    assert_eq!(field.len(), 500);
    assert!(in_box(&field));
    for p in field.particles() {
        assert!(p.velocity.y < 0.0, "every flake falls");
        assert!(p.velocity.x.abs() <= 0.05 && p.velocity.z.abs() <= 0.05);
    }
}

#[test]
fn stays_inside_the_box_over_time() {
    let mut field = SnowField::new(1500, &mut StdRng::seed_from_u64(2));
    for i in 0..3000 {
        field.tick();
        if i % 100 == 0 {
            assert!(in_box(&field), "flake escaped at tick {}", i);
        }
    }
    assert!(in_box(&field));
    assert!((0.0..std::f32::consts::TAU).contains(&field.rotation()));
}

#[test]
fn fallen_flakes_reenter_near_the_top() {
    let mut field = SnowField::new(200, &mut StdRng::seed_from_u64(3));
    let start: Vec<f32> = field.particles().iter().map(|p| p.position.y).collect();
    let mut recycled = false;
    for _ in 0..2000 {
        let before: Vec<f32> = field.particles().iter().map(|p| p.position.y).collect();
        field.tick();
        for (b, p) in before.iter().zip(field.particles()) {
            if p.position.y > *b {
                recycled = true;
                assert!(p.position.y > SNOW_CEILING - 1.0, "re-entered at {}", p.position.y);
            }
        }
    }
    assert!(recycled);
    assert_eq!(start.len(), field.len());
}

#[test]
fn field_rotation_advances() {
    let mut field = SnowField::new(10, &mut StdRng::seed_from_u64(4));
    assert_eq!(field.rotation(), 0.0);
    field.tick();
    assert!(field.rotation() > 0.0);
}

#[test]
fn wrap_maps_into_half_open_range() {
    assert_eq!(wrap(0.0, -50.0, 100.0), 0.0);
    assert_eq!(wrap(50.0, -50.0, 100.0), -50.0);
    assert!((wrap(50.5, -50.0, 100.0) - (-49.5)).abs() < 1e-4);
    assert!((wrap(-50.5, -50.0, 100.0) - 49.5).abs() < 1e-4);
    assert!((wrap(275.0, -50.0, 100.0) - (-25.0)).abs() < 1e-4);

    // Tiny negative offsets must not round up onto the excluded bound
    let w = wrap(-1e-10, 0.0, 100.0);
    assert!((0.0..100.0).contains(&w), "got {}", w);
}

#[test]
fn empty_field_is_fine() {
    let mut field = SnowField::new(0, &mut StdRng::seed_from_u64(5));
    assert!(field.is_empty());
    field.tick();
}
