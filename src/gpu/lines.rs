//! Connection line rendering.
//!
//! Segments live in a storage buffer; the vertex shader expands each one
//! into a quad via `instance_index`, wide enough to carry the inherited glow
//! around the stroke core. Degenerate (zero-length) segments collapse
//! off-screen instead of normalizing a zero vector.

use bytemuck::{Pod, Zeroable};

/// One recorded line segment, as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct LineSegment {
    pub a: [f32; 2],
    pub b: [f32; 2],
    pub color: [f32; 3],
    pub alpha: f32,
    pub width: f32,
    pub glow: f32,
    // vec3 alignment pads the WGSL struct to 48 bytes
    pub _pad: [f32; 2],
}

pub(crate) const LINE_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
};

struct Segment {
    a: vec2<f32>,
    b: vec2<f32>,
    color: vec3<f32>,
    alpha: f32,
    width: f32,
    glow: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> segments: array<Segment>;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) across: f32,
    @location(1) color: vec3<f32>,
    @location(2) alpha: f32,
    @location(3) core: f32,
};

fn to_clip(pixel: vec2<f32>) -> vec4<f32> {
    return vec4<f32>(
        pixel.x / uniforms.resolution.x * 2.0 - 1.0,
        1.0 - pixel.y / uniforms.resolution.y * 2.0,
        0.0,
        1.0,
    );
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    let seg = segments[instance_index];

    var out: VertexOutput;
    out.color = seg.color;

    let span = seg.b - seg.a;
    if length(span) < 0.001 {
        out.clip_position = vec4<f32>(0.0, 0.0, -1000.0, 1.0);
        out.across = 0.0;
        out.alpha = 0.0;
        out.core = 1.0;
        return out;
    }

    let dir = normalize(span);
    let half_extent = max(seg.width * 0.5 + seg.glow, 0.001);
    let perp = vec2<f32>(-dir.y, dir.x) * half_extent;

    var pixel: vec2<f32>;
    var across: f32;
    switch vertex_index {
        case 0u: { pixel = seg.a - perp; across = -1.0; }
        case 1u: { pixel = seg.a + perp; across = 1.0; }
        case 2u: { pixel = seg.b - perp; across = -1.0; }
        case 3u: { pixel = seg.a + perp; across = 1.0; }
        case 4u: { pixel = seg.b - perp; across = -1.0; }
        default: { pixel = seg.b + perp; across = 1.0; }
    }

    out.clip_position = to_clip(pixel);
    out.across = across;
    out.alpha = seg.alpha;
    out.core = min(seg.width * 0.5 / half_extent, 1.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let d = abs(in.across);
    if d <= in.core {
        return vec4<f32>(in.color, in.alpha);
    }
    let falloff = 1.0 - smoothstep(in.core, 1.0, d);
    return vec4<f32>(in.color, in.alpha * falloff);
}
"#;

/// GPU resources for line rendering.
pub(crate) struct LineRenderer {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group: wgpu::BindGroup,
    bind_group_layout: wgpu::BindGroupLayout,
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl LineRenderer {
    pub fn new(
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        surface_format: wgpu::TextureFormat,
        capacity: usize,
    ) -> Self {
        let capacity = capacity.max(1);
        let buffer = create_segment_buffer(device, capacity);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Line Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = create_bind_group(device, &bind_group_layout, uniform_buffer, &buffer);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
            bind_group_layout,
            buffer,
            capacity,
        }
    }

    /// Write segments to the GPU, growing the storage buffer (and rebuilding
    /// its bind group) when the frame holds more than ever before.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniform_buffer: &wgpu::Buffer,
        segments: &[LineSegment],
    ) {
        if segments.len() > self.capacity {
            self.capacity = segments.len().next_power_of_two();
            self.buffer = create_segment_buffer(device, self.capacity);
            self.bind_group =
                create_bind_group(device, &self.bind_group_layout, uniform_buffer, &self.buffer);
        }
        if !segments.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(segments));
        }
    }
}

fn create_segment_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Line Segment Buffer"),
        size: (capacity * std::mem::size_of::<LineSegment>()) as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    segment_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Line Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: segment_buffer.as_entire_binding(),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_shader_is_valid() {
        let module =
            naga::front::wgsl::parse_str(LINE_SHADER).expect("line shader should parse");
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .expect("line shader should validate");
    }

    #[test]
    fn test_segment_matches_wgsl_stride() {
        // The WGSL Segment struct rounds up to 48 bytes (vec3 alignment).
        assert_eq!(std::mem::size_of::<LineSegment>(), 48);
        assert_eq!(std::mem::offset_of!(LineSegment, color), 16);
        assert_eq!(std::mem::offset_of!(LineSegment, alpha), 28);
        assert_eq!(std::mem::offset_of!(LineSegment, width), 32);
        assert_eq!(std::mem::offset_of!(LineSegment, glow), 36);
    }
}
