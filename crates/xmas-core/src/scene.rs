//! Procedural scene construction and the small node arena the tree lives in.
//!
//! The arena is intentionally flat: nodes refer to their parent by id and the
//! renderer/picker compose world matrices by walking that chain. Nodes carry a
//! typed [`NodeTag`] so hit-testing can ask "is this an ornament?" without
//! string names.

use crate::constants::*;
use crate::mesh::{self, MeshData};
use glam::{Mat4, Quat, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Opaque reference to a decoded photo owned by the frontend (e.g. a GPU texture).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PhotoHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTag {
    TreeRoot,
    Foliage,
    Trunk,
    Star,
    Bulb,
    Ornament,
    Decoration,
    Ground,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
    /// Photo shown on the +Z face of the mesh, if any.
    pub photo: Option<PhotoHandle>,
}

impl Material {
    pub fn solid(color: [f32; 3]) -> Self {
        Self {
            color,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            opacity: 1.0,
            photo: None,
        }
    }

    pub fn glowing(color: [f32; 3], intensity: f32) -> Self {
        Self {
            emissive: color,
            emissive_intensity: intensity,
            ..Self::solid(color)
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub parent: Option<NodeId>,
    pub transform: Transform,
    pub mesh: Option<MeshId>,
    pub material: Material,
    pub tag: NodeTag,
}

/// One cone of foliage; its identity never changes after construction.
#[derive(Clone, Copy, Debug)]
pub struct TreeLayer {
    pub node: NodeId,
    pub index: usize,
    pub base_y: f32,
    pub blossom_offset: f32,
}

/// Blinking decoration light. Intensity is a pure function of time and `phase`.
#[derive(Clone, Copy, Debug)]
pub struct Bulb {
    pub node: NodeId,
    pub base_intensity: f32,
    pub phase: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Ornament {
    pub node: NodeId,
    pub bow: NodeId,
    pub photo: PhotoHandle,
}

/// Geometry parameters for one foliage layer.
#[derive(Clone, Copy, Debug)]
pub struct LayerParams {
    pub r_top: f32,
    pub r_bottom: f32,
    pub height: f32,
    pub y: f32,
    pub segments: u32,
    pub blossom_offset: f32,
}

/// Lower layers get the larger blossom offsets, which pushes them out first.
pub const LAYER_PARAMS: [LayerParams; LAYER_COUNT] = [
    LayerParams { r_top: 0.5, r_bottom: 9.0, height: 8.0, y: 4.0, segments: 8, blossom_offset: 5.5 },
    LayerParams { r_top: 0.5, r_bottom: 7.0, height: 7.0, y: 9.0, segments: 8, blossom_offset: 4.5 },
    LayerParams { r_top: 0.5, r_bottom: 5.0, height: 6.0, y: 13.5, segments: 7, blossom_offset: 3.5 },
    LayerParams { r_top: 0.1, r_bottom: 3.0, height: 5.0, y: 17.5, segments: 6, blossom_offset: 2.5 },
];

pub struct Scene {
    nodes: Vec<SceneNode>,
    meshes: Vec<MeshData>,
    pub root: NodeId,
    pub ground: NodeId,
    pub star: NodeId,
    pub layers: Vec<TreeLayer>,
    pub bulbs: Vec<Bulb>,
    pub ornaments: Vec<Ornament>,
    ornament_mesh: MeshId,
    bow_mesh: MeshId,
}

impl Scene {
    /// Build the tree, trunk, star, bulbs and ground plane.
    ///
    /// Randomness only affects vertex jitter and bulb placement/colour/intensity.
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut scene = Scene {
            nodes: Vec::new(),
            meshes: Vec::new(),
            root: NodeId(0),
            ground: NodeId(0),
            star: NodeId(0),
            layers: Vec::with_capacity(LAYER_COUNT),
            bulbs: Vec::with_capacity(BULB_COUNT),
            ornaments: Vec::new(),
            ornament_mesh: MeshId(0),
            bow_mesh: MeshId(0),
        };

        let ground_mesh = scene.add_mesh(mesh::ground_plane(GROUND_SIZE));
        scene.ground = scene.add_node(SceneNode {
            parent: None,
            transform: Transform::default(),
            mesh: Some(ground_mesh),
            material: Material::solid(GROUND_COLOR),
            tag: NodeTag::Ground,
        });

        scene.root = scene.add_node(SceneNode {
            parent: None,
            transform: Transform::default(),
            mesh: None,
            material: Material::solid([1.0; 3]),
            tag: NodeTag::TreeRoot,
        });

        for (index, p) in LAYER_PARAMS.iter().enumerate() {
            let m = scene.add_mesh(mesh::frustum(
                p.r_top,
                p.r_bottom,
                p.height,
                p.segments,
                Some((&mut *rng, LAYER_VERTEX_JITTER)),
            ));
            let node = scene.add_child(scene.root, Vec3::new(0.0, p.y, 0.0), m, Material::solid(LEAF_COLOR), NodeTag::Foliage);
            scene.layers.push(TreeLayer {
                node,
                index,
                base_y: p.y,
                blossom_offset: p.blossom_offset,
            });
        }

        let trunk_mesh = scene.add_mesh(mesh::frustum(1.2, 1.6, 5.0, 8, Some((&mut *rng, 0.0))));
        scene.add_child(scene.root, Vec3::new(0.0, TRUNK_Y, 0.0), trunk_mesh, Material::solid(TRUNK_COLOR), NodeTag::Trunk);

        let star_mesh = scene.add_mesh(mesh::octahedron(STAR_RADIUS));
        scene.star = scene.add_child(
            scene.root,
            Vec3::new(0.0, STAR_Y, 0.0),
            star_mesh,
            Material::glowing(STAR_COLOR, STAR_EMISSIVE),
            NodeTag::Star,
        );

        scene.add_bulbs(rng);

        scene.ornament_mesh = scene.add_mesh(mesh::cuboid(
            ORNAMENT_SIZE,
            ORNAMENT_SIZE,
            ORNAMENT_SIZE * ORNAMENT_DEPTH_RATIO,
        ));
        scene.bow_mesh = scene.add_mesh(mesh::uv_sphere(BOW_RADIUS, 8, 6));

        log::info!(
            "[scene] built {} layers, {} bulbs, {} nodes",
            scene.layers.len(),
            scene.bulbs.len(),
            scene.nodes.len()
        );
        scene
    }

    fn add_bulbs<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let bulb_mesh = self.add_mesh(mesh::uv_sphere(BULB_RADIUS, 12, 12));
        for i in 0..BULB_COUNT {
            let color = BULB_COLORS[rng.gen_range(0..BULB_COLORS.len())];
            let angle = i as f32 * BULB_ANGLE_STEP + rng.gen::<f32>() * BULB_ANGLE_JITTER;
            let y = rng.gen::<f32>() * BULB_Y_SPAN + BULB_MIN_Y;
            let r = bulb_radius_at(y);
            let pos = Vec3::new(angle.cos() * r, y, angle.sin() * r);
            let base_intensity = BULB_BASE_INTENSITY + rng.gen::<f32>() * BULB_INTENSITY_SPAN;
            let node = self.add_child(
                self.root,
                pos,
                bulb_mesh,
                Material::glowing(color, BULB_BASE_INTENSITY),
                NodeTag::Bulb,
            );
            self.bulbs.push(Bulb {
                node,
                base_intensity,
                phase: pos.x,
            });
        }
    }

    /// Hang a new photo ornament on the tree and return its node.
    ///
    /// Placement depends only on how many ornaments already exist, so
    /// successive uploads spiral up the tree instead of stacking.
    pub fn add_ornament(&mut self, photo: PhotoHandle) -> NodeId {
        let n = self.ornaments.len();
        let (pos, rotation) = ornament_placement(n);
        let node = self.add_node(SceneNode {
            parent: Some(self.root),
            transform: Transform {
                translation: pos,
                rotation,
                scale: Vec3::ONE,
            },
            mesh: Some(self.ornament_mesh),
            material: Material {
                photo: Some(photo),
                ..Material::solid(GIFT_COLOR)
            },
            tag: NodeTag::Ornament,
        });
        let bow = self.add_child(
            node,
            Vec3::new(0.0, ORNAMENT_SIZE * 0.5, 0.0),
            self.bow_mesh,
            Material::solid(BOW_COLOR),
            NodeTag::Decoration,
        );
        self.ornaments.push(Ornament { node, bow, photo });
        log::info!("[upload] ornament #{} at ({:.2},{:.2},{:.2})", n, pos.x, pos.y, pos.z);
        node
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() as u32 - 1)
    }

    pub fn add_node(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() as u32 - 1)
    }

    fn add_child(
        &mut self,
        parent: NodeId,
        translation: Vec3,
        mesh: MeshId,
        material: Material,
        tag: NodeTag,
    ) -> NodeId {
        self.add_node(SceneNode {
            parent: Some(parent),
            transform: Transform::from_translation(translation),
            mesh: Some(mesh),
            material,
            tag,
        })
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh(&self, id: MeshId) -> &MeshData {
        &self.meshes[id.0 as usize]
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn tree_rotation(&self) -> f32 {
        let (axis, angle) = self.node(self.root).transform.rotation.to_axis_angle();
        if axis.y < 0.0 {
            -angle
        } else {
            angle
        }
    }

    pub fn set_tree_rotation(&mut self, angle: f32) {
        let root = self.root;
        self.node_mut(root).transform.rotation = Quat::from_rotation_y(angle);
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.matrix();
        match node.parent {
            Some(p) => self.world_matrix(p) * local,
            None => local,
        }
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    pub fn world_rotation(&self, id: NodeId) -> Quat {
        let (_, rotation, _) = self.world_matrix(id).to_scale_rotation_translation();
        rotation
    }

    /// True if `id` is `ancestor` or lives somewhere below it.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.node(c).parent;
        }
        false
    }

    /// Walk up from a picked node looking for an ornament.
    ///
    /// The walk stops at the tree root's direct children, so hitting a
    /// foliage layer or bulb yields `None`.
    pub fn ornament_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            let node = self.node(cur);
            if node.tag == NodeTag::Ornament {
                return Some(cur);
            }
            match node.parent {
                Some(p) if self.node(p).tag != NodeTag::TreeRoot => cur = p,
                _ => return None,
            }
        }
    }
}

/// Distance of a bulb from the trunk axis at height `y`; narrows toward the top.
pub fn bulb_radius_at(y: f32) -> f32 {
    (9.0 * (1.0 - (y - BULB_MIN_Y) / 20.0)).max(BULB_MIN_RADIUS) + 0.5
}

/// Position and outward-facing orientation of the `n`-th ornament.
///
/// The local +Z axis (the photo face) points away from the trunk.
pub fn ornament_placement(n: usize) -> (Vec3, Quat) {
    let angle = n as f32 * ORNAMENT_ANGLE_STEP + std::f32::consts::PI;
    let y = ORNAMENT_BASE_Y + n as f32 * ORNAMENT_Y_STEP;
    let r = (9.0 * (1.0 - (y - 3.0) / 20.0)).max(ORNAMENT_MIN_RADIUS) + 0.5;
    let pos = Vec3::new(angle.cos() * r, y, angle.sin() * r);
    let yaw = pos.x.atan2(pos.z);
    (pos, Quat::from_rotation_y(yaw))
}
