//! Flat-shaded triangle meshes for the stylized scene.
//!
//! Everything is emitted as a plain triangle list (no index buffer) so each
//! face carries its own normal, which gives the low-poly look. Shapes are
//! convex and centered on their local origin, which lets normals be oriented
//! outward from the face centroid.

use glam::{Vec2, Vec3};
use rand::Rng;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Local-space bounds used for ray picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounds {
    Sphere { radius: f32 },
    Aabb { half_extents: Vec3 },
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub bounds: Bounds,
}

impl MeshData {
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

fn push_face(out: &mut Vec<Vertex>, tri: [Vec3; 3], uvs: [Vec2; 3]) {
    let mut n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
    let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
    if n.dot(centroid) < 0.0 {
        n = -n;
    }
    for (p, uv) in tri.iter().zip(uvs.iter()) {
        out.push(Vertex {
            position: p.to_array(),
            normal: n.to_array(),
            uv: uv.to_array(),
        });
    }
}

fn push_quad(out: &mut Vec<Vertex>, q: [Vec3; 4], uvs: [Vec2; 4]) {
    push_face(out, [q[0], q[1], q[2]], [uvs[0], uvs[1], uvs[2]]);
    push_face(out, [q[0], q[2], q[3]], [uvs[0], uvs[2], uvs[3]]);
}

/// Truncated cone along Y, centered at the origin (y in [-h/2, h/2]).
///
/// When `jitter` is given, every rim vertex is displaced vertically by a
/// uniform random amount in `[-span/2, span/2]` which breaks up the silhouette.
pub fn frustum<R: Rng + ?Sized>(
    r_top: f32,
    r_bottom: f32,
    height: f32,
    segments: u32,
    jitter: Option<(&mut R, f32)>,
) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let ring = |r: f32, y: f32| -> Vec<Vec3> {
        (0..segments)
            .map(|i| {
                let a = i as f32 / segments as f32 * std::f32::consts::TAU;
                Vec3::new(r * a.sin(), y, r * a.cos())
            })
            .collect()
    };
    let mut top = ring(r_top, half);
    let mut bottom = ring(r_bottom, -half);
    if let Some((rng, span)) = jitter {
        for p in top.iter_mut().chain(bottom.iter_mut()) {
            p.y += (rng.gen::<f32>() - 0.5) * span;
        }
    }

    let seg = segments as usize;
    let mut out = Vec::with_capacity(seg * 12);
    for i in 0..seg {
        let j = (i + 1) % seg;
        let u0 = i as f32 / seg as f32;
        let u1 = (i + 1) as f32 / seg as f32;
        push_quad(
            &mut out,
            [top[i], bottom[i], bottom[j], top[j]],
            [
                Vec2::new(u0, 0.0),
                Vec2::new(u0, 1.0),
                Vec2::new(u1, 1.0),
                Vec2::new(u1, 0.0),
            ],
        );
    }
    let top_center = Vec3::new(0.0, half, 0.0);
    let bottom_center = Vec3::new(0.0, -half, 0.0);
    for i in 0..seg {
        let j = (i + 1) % seg;
        push_face(&mut out, [top_center, top[i], top[j]], [Vec2::splat(0.5); 3]);
        push_face(&mut out, [bottom_center, bottom[j], bottom[i]], [Vec2::splat(0.5); 3]);
    }

    let max_y = top
        .iter()
        .chain(bottom.iter())
        .fold(half, |m, p| m.max(p.y.abs()));
    MeshData {
        vertices: out,
        bounds: Bounds::Aabb {
            half_extents: Vec3::new(r_top.max(r_bottom), max_y, r_top.max(r_bottom)),
        },
    }
}

/// Axis-aligned box. Faces are emitted in the order +X, -X, +Y, -Y, +Z, -Z;
/// the +Z face carries the full `[0, 1]` UV square for the photo.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;
    let c = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);
    let uv = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ];
    let faces = [
        [c(1., 1., 1.), c(1., -1., 1.), c(1., -1., -1.), c(1., 1., -1.)],
        [c(-1., 1., -1.), c(-1., -1., -1.), c(-1., -1., 1.), c(-1., 1., 1.)],
        [c(-1., 1., -1.), c(-1., 1., 1.), c(1., 1., 1.), c(1., 1., -1.)],
        [c(-1., -1., 1.), c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.)],
        [c(-1., 1., 1.), c(-1., -1., 1.), c(1., -1., 1.), c(1., 1., 1.)],
        [c(1., 1., -1.), c(1., -1., -1.), c(-1., -1., -1.), c(-1., 1., -1.)],
    ];
    let mut out = Vec::with_capacity(36);
    for f in faces {
        push_quad(&mut out, f, uv);
    }
    MeshData {
        vertices: out,
        bounds: Bounds::Aabb { half_extents: h },
    }
}

pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let point = |i: u32, j: u32| -> Vec3 {
        let theta = j as f32 / hs as f32 * std::f32::consts::PI;
        let phi = i as f32 / ws as f32 * std::f32::consts::TAU;
        Vec3::new(
            radius * theta.sin() * phi.cos(),
            radius * theta.cos(),
            radius * theta.sin() * phi.sin(),
        )
    };
    let mut out = Vec::with_capacity((ws * hs * 6) as usize);
    for j in 0..hs {
        for i in 0..ws {
            let uv = |ii: u32, jj: u32| Vec2::new(ii as f32 / ws as f32, jj as f32 / hs as f32);
            let (a, b, c, d) = (point(i, j), point(i, j + 1), point(i + 1, j + 1), point(i + 1, j));
            if j != 0 {
                push_face(&mut out, [a, b, d], [uv(i, j), uv(i, j + 1), uv(i + 1, j)]);
            }
            if j != hs - 1 {
                push_face(&mut out, [b, c, d], [uv(i, j + 1), uv(i + 1, j + 1), uv(i + 1, j)]);
            }
        }
    }
    MeshData {
        vertices: out,
        bounds: Bounds::Sphere { radius },
    }
}

pub fn octahedron(radius: f32) -> MeshData {
    let px = Vec3::X * radius;
    let py = Vec3::Y * radius;
    let pz = Vec3::Z * radius;
    let mut out = Vec::with_capacity(24);
    for (sx, sz) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
        for sy in [1.0, -1.0] {
            push_face(&mut out, [px * sx, py * sy, pz * sz], [Vec2::splat(0.5); 3]);
        }
    }
    MeshData {
        vertices: out,
        bounds: Bounds::Sphere { radius },
    }
}

/// Square in the XZ plane facing +Y.
pub fn ground_plane(size: f32) -> MeshData {
    let h = size * 0.5;
    let n = [0.0, 1.0, 0.0];
    let corners = [
        ([-h, 0.0, -h], [0.0, 0.0]),
        ([-h, 0.0, h], [0.0, 1.0]),
        ([h, 0.0, h], [1.0, 1.0]),
        ([h, 0.0, -h], [1.0, 0.0]),
    ];
    let vertices = [0, 1, 2, 0, 2, 3]
        .iter()
        .map(|&i| Vertex {
            position: corners[i].0,
            normal: n,
            uv: corners[i].1,
        })
        .collect();
    MeshData {
        vertices,
        bounds: Bounds::Aabb {
            half_extents: Vec3::new(h, 0.01, h),
        },
    }
}
