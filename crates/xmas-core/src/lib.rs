pub mod animator;
pub mod blossom;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod media;
pub mod mesh;
pub mod orbit;
pub mod picking;
pub mod router;
pub mod scene;
pub mod snow;
pub mod state;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static SNOW_WGSL: &str = include_str!("../shaders/snow.wgsl");

pub use animator::*;
pub use blossom::*;
pub use camera::*;
pub use config::*;
pub use error::{Result, XmasError};
pub use gesture::*;
pub use media::*;
pub use mesh::{Bounds, MeshData, Vertex};
pub use orbit::*;
pub use picking::*;
pub use router::*;
pub use scene::*;
pub use snow::*;
pub use state::*;
