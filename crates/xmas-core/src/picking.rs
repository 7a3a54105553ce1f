//! Ray casting against scene nodes.

use crate::mesh::Bounds;
use crate::scene::{NodeId, Scene};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    /// World-space distance from the ray origin.
    pub distance: f32,
}

pub type Hits = SmallVec<[Hit; 16]>;

/// Nearest non-negative `t` where the ray meets the sphere. A ray starting
/// inside the sphere reports its exit point.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let a = ray_dir.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = oc.dot(ray_dir) / a;
    let c = (oc.length_squared() - radius * radius) / a;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t0 = -b - sq;
    let t1 = -b + sq;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

/// Slab test against an origin-centered box.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_dir[axis];
        let h = half_extents[axis];
        if d.abs() < 1e-8 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        None
    } else {
        Some(t_min.max(0.0))
    }
}

/// Intersect every mesh-carrying node and return the hits nearest first.
pub fn raycast(scene: &Scene, ray_origin: Vec3, ray_dir: Vec3) -> Hits {
    let mut hits: Hits = SmallVec::new();
    for (id, node) in scene.nodes() {
        let Some(mesh) = node.mesh else {
            continue;
        };
        let world = scene.world_matrix(id);
        let inv = world.inverse();
        let lo = inv.transform_point3(ray_origin);
        let ld = inv.transform_vector3(ray_dir);
        let t = match scene.mesh(mesh).bounds {
            Bounds::Sphere { radius } => ray_sphere(lo, ld, Vec3::ZERO, radius),
            Bounds::Aabb { half_extents } => ray_aabb(lo, ld, half_extents),
        };
        if let Some(t) = t {
            let world_hit = world.transform_point3(lo + ld * t);
            hits.push(Hit {
                node: id,
                distance: world_hit.distance(ray_origin),
            });
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// First ornament along the ray, found by walking each hit up its parent chain.
pub fn pick_ornament(scene: &Scene, ray_origin: Vec3, ray_dir: Vec3) -> Option<NodeId> {
    raycast(scene, ray_origin, ray_dir)
        .iter()
        .find_map(|hit| scene.ornament_ancestor(hit.node))
}
