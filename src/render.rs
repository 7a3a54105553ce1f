use fnv::FnvHashMap;
use glam::Mat4;
use web_sys as web;
use wgpu::util::DeviceExt;
use xmas_core::constants::{
    AMBIENT_COLOR, AMBIENT_INTENSITY, FOG_COLOR, FOG_DENSITY, SNOW_SIZE, SUN_COLOR, SUN_INTENSITY,
    SUN_POSITION,
};
use xmas_core::{MeshId, PhotoHandle, Vertex, World};

mod helpers;
mod photos;
mod snow;
mod targets;
use photos::PhotoResources;
use snow::{create_snow_resources, SnowResources};
use targets::DepthTarget;

// Dynamic uniform offsets must be multiples of 256 on WebGPU.
const OBJECT_STRIDE: usize = 256;
const INITIAL_OBJECT_CAPACITY: usize = 128;

const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    sun_dir: [f32; 4],
    sun_color: [f32; 4],
    ambient: [f32; 4],
    fog: [f32; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    flags: [f32; 4],
}

struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

struct Draw {
    mesh: MeshId,
    photo: Option<PhotoHandle>,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bg: wgpu::BindGroup,
    object_capacity: usize,
    object_staging: Vec<u8>,

    mesh_pipeline: wgpu::RenderPipeline,
    snow: SnowResources,
    photos: PhotoResources,
    meshes: FnvHashMap<MeshId, GpuMesh>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, snow_capacity: usize) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, width, height);

        // Group 0: per-frame globals
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(0, false)],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Group 1: per-node uniforms behind a dynamic offset
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[helpers::uniform_layout_entry(0, true)],
        });
        let (object_buffer, object_bg) =
            create_object_buffer(&device, &object_bgl, INITIAL_OBJECT_CAPACITY);

        let photos = PhotoResources::new(&device, &queue);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(xmas_core::SCENE_WGSL.into()),
        });
        let mesh_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&globals_bgl, &object_bgl, &photos.layout],
            push_constant_ranges: &[],
        });
        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        }];
        let mesh_pipeline = helpers::make_depth_pipeline(
            &device,
            "mesh_pipeline",
            &mesh_pl,
            &scene_shader,
            "vs_main",
            "fs_main",
            &mesh_buffers,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            true,
        );
        let snow = create_snow_resources(&device, &globals_bgl, format, snow_capacity);

        log::info!("[render] WebGPU ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            globals_buffer,
            globals_bg,
            object_bgl,
            object_buffer,
            object_bg,
            object_capacity: INITIAL_OBJECT_CAPACITY,
            object_staging: Vec::new(),
            mesh_pipeline,
            snow,
            photos,
            meshes: FnvHashMap::default(),
            width,
            height,
            clear_color: wgpu::Color {
                r: FOG_COLOR[0] as f64,
                g: FOG_COLOR[1] as f64,
                b: FOG_COLOR[2] as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    /// Reapply the current surface configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn upload_photo(&mut self, handle: PhotoHandle, bitmap: &web::ImageBitmap) {
        self.photos.upload(&self.device, &self.queue, handle, bitmap);
    }

    fn sync_meshes(&mut self, world: &World) {
        for i in 0..world.scene.mesh_count() {
            let id = MeshId(i as u32);
            if self.meshes.contains_key(&id) {
                continue;
            }
            let data = world.scene.mesh(id);
            let buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_vertices"),
                    contents: bytemuck::cast_slice(&data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            self.meshes.insert(
                id,
                GpuMesh {
                    buffer,
                    vertex_count: data.vertex_count(),
                },
            );
        }
    }

    fn ensure_object_capacity(&mut self, needed: usize) {
        if needed <= self.object_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        let (buffer, bg) = create_object_buffer(&self.device, &self.object_bgl, capacity);
        self.object_buffer.destroy();
        self.object_buffer = buffer;
        self.object_bg = bg;
        self.object_capacity = capacity;
    }

    fn write_globals(&self, world: &World) {
        let cam = &world.camera;
        let view = cam.view_matrix();
        let view_proj: Mat4 = cam.projection_matrix() * view;
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        let sun = SUN_POSITION.normalize();
        let g = Globals {
            view_proj: view_proj.to_cols_array_2d(),
            eye: cam.eye.extend(1.0).to_array(),
            sun_dir: [sun.x, sun.y, sun.z, SUN_INTENSITY],
            sun_color: [SUN_COLOR[0], SUN_COLOR[1], SUN_COLOR[2], 0.0],
            ambient: [
                AMBIENT_COLOR[0],
                AMBIENT_COLOR[1],
                AMBIENT_COLOR[2],
                AMBIENT_INTENSITY,
            ],
            fog: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_DENSITY],
            cam_right: [right.x, right.y, right.z, SNOW_SIZE],
            cam_up: [up.x, up.y, up.z, world.snow.rotation()],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&g));
    }

    /// Pack one uniform block per drawable node into the staging buffer.
    fn write_objects(&mut self, world: &World) -> Vec<Draw> {
        let mut draws = Vec::with_capacity(world.scene.node_count());
        self.object_staging.clear();
        for (id, node) in world.scene.nodes() {
            let Some(mesh) = node.mesh else {
                continue;
            };
            let m = &node.material;
            let u = ObjectUniforms {
                model: world.scene.world_matrix(id).to_cols_array_2d(),
                color: [m.color[0], m.color[1], m.color[2], m.opacity],
                emissive: [
                    m.emissive[0],
                    m.emissive[1],
                    m.emissive[2],
                    m.emissive_intensity,
                ],
                flags: [if m.photo.is_some() { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
            };
            let start = self.object_staging.len();
            self.object_staging.extend_from_slice(bytemuck::bytes_of(&u));
            self.object_staging.resize(start + OBJECT_STRIDE, 0);
            draws.push(Draw {
                mesh,
                photo: m.photo,
            });
        }
        self.ensure_object_capacity(draws.len());
        if !self.object_staging.is_empty() {
            self.queue
                .write_buffer(&self.object_buffer, 0, &self.object_staging);
        }
        draws
    }

    pub fn render(&mut self, world: &World) -> Result<(), wgpu::SurfaceError> {
        self.sync_meshes(world);
        self.write_globals(world);
        let draws = self.write_objects(world);
        self.snow.write(&self.device, &self.queue, &world.snow);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for (i, d) in draws.iter().enumerate() {
                let Some(mesh) = self.meshes.get(&d.mesh) else {
                    continue;
                };
                let offset = (i * OBJECT_STRIDE) as u32;
                rpass.set_bind_group(1, &self.object_bg, &[offset]);
                rpass.set_bind_group(2, self.photos.bind_group(d.photo), &[]);
                rpass.set_vertex_buffer(0, mesh.buffer.slice(..));
                rpass.draw(0..mesh.vertex_count, 0..1);
            }

            self.snow.draw(&mut rpass, &self.globals_bg);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_object_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object_uniforms"),
        size: (capacity * OBJECT_STRIDE) as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
            }),
        }],
    });
    (buffer, bg)
}
