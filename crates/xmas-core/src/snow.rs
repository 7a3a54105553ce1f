use crate::constants::*;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowParticle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Fixed-size cloud of falling flakes inside a 100 x 80 x 100 box.
///
/// Velocities are chosen once at spawn. X/Z wrap around the box and a flake
/// that falls through the ground re-enters just below the ceiling.
#[derive(Clone, Debug)]
pub struct SnowField {
    particles: Vec<SnowParticle>,
    /// Yaw of the whole field, radians.
    rotation: f32,
}

impl SnowField {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let extent = SNOW_HALF_EXTENT * 2.0;
        let particles = (0..count)
            .map(|_| SnowParticle {
                position: Vec3::new(
                    rng.gen::<f32>() * extent - SNOW_HALF_EXTENT,
                    rng.gen::<f32>() * SNOW_CEILING,
                    rng.gen::<f32>() * extent - SNOW_HALF_EXTENT,
                ),
                velocity: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * SNOW_DRIFT,
                    -(rng.gen::<f32>() * SNOW_FALL_SPAN + SNOW_FALL_MIN),
                    (rng.gen::<f32>() - 0.5) * SNOW_DRIFT,
                ),
            })
            .collect();
        Self {
            particles,
            rotation: 0.0,
        }
    }

    pub fn particles(&self) -> &[SnowParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn tick(&mut self) {
        let span = SNOW_HALF_EXTENT * 2.0;
        for p in &mut self.particles {
            p.position.x = wrap(p.position.x + p.velocity.x, -SNOW_HALF_EXTENT, span);
            p.position.z = wrap(p.position.z + p.velocity.z, -SNOW_HALF_EXTENT, span);
            p.position.y += p.velocity.y;
            if p.position.y < 0.0 {
                p.position.y = (p.position.y + SNOW_CEILING).min(SNOW_RESPAWN_MAX_Y);
            }
        }
        self.rotation = (self.rotation + SNOW_SPIN) % std::f32::consts::TAU;
    }
}

/// Wrap `v` into `[min, min + span)`.
pub fn wrap(v: f32, min: f32, span: f32) -> f32 {
    let r = (v - min).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    if r >= span {
        min
    } else {
        min + r
    }
}
