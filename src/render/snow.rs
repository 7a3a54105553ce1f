use super::helpers;
use wgpu;
use xmas_core::SnowField;

const SNOW_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Instanced billboard pass for the snow field.
pub(crate) struct SnowResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

pub(crate) fn create_snow_resources(
    device: &wgpu::Device,
    globals_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    capacity: usize,
) -> SnowResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("snow_shader"),
        source: wgpu::ShaderSource::Wgsl(xmas_core::SNOW_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("snow_pl"),
        bind_group_layouts: &[globals_bgl],
        push_constant_ranges: &[],
    });
    let buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &SNOW_ATTRS,
    }];
    let pipeline = helpers::make_depth_pipeline(
        device,
        "snow_pipeline",
        &pl,
        &shader,
        "vs_snow",
        "fs_snow",
        &buffers,
        color_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        false,
    );
    SnowResources {
        pipeline,
        instance_buffer: create_instance_buffer(device, capacity),
        capacity,
        count: 0,
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("snow_instances"),
        size: (capacity.max(1) * std::mem::size_of::<[f32; 3]>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl SnowResources {
    /// Upload this frame's particle positions (local to the field; the shader applies its yaw).
    pub(crate) fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, snow: &SnowField) {
        if snow.len() > self.capacity {
            self.capacity = snow.len();
            self.instance_buffer = create_instance_buffer(device, self.capacity);
        }
        let positions: Vec<[f32; 3]> = snow
            .particles()
            .iter()
            .map(|p| p.position.to_array())
            .collect();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&positions));
        self.count = positions.len() as u32;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, globals_bg: &wgpu::BindGroup) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, globals_bg, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
