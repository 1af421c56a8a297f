use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};
use tree_core::mesh::{MeshData, MeshVertex};
use tree_core::{OrnamentInstance, SpriteInstance};
use wgpu;
use wgpu::util::DeviceExt;

/// Per-frame camera and lighting block shared by every scene shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) cam_right: [f32; 4],
    pub(crate) cam_up: [f32; 4],
    pub(crate) eye: [f32; 4],
    pub(crate) light_dir: [f32; 4],
    pub(crate) time: f32,
    pub(crate) progress: f32,
    pub(crate) ground_y: f32,
    pub(crate) _pad: f32,
}

const _: () = assert!(std::mem::size_of::<SceneUniforms>() == 144);

const MESH_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const SPRITE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];
const ORNAMENT_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4
];

fn mesh_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_ATTRS,
    }
}

/// Index/vertex buffers for one static mesh.
pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

pub(crate) struct SceneResources {
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) ground_pipeline: wgpu::RenderPipeline,
    pub(crate) ornament_pipeline: wgpu::RenderPipeline,
    pub(crate) sprite_pipeline: wgpu::RenderPipeline,
}

fn depth_state(write: bool) -> Option<wgpu::DepthStencilState> {
    Some(wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    })
}

#[allow(clippy::too_many_arguments)]
fn make_scene_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vs_entry: &str,
    fs_entry: &str,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    cull_mode: Option<wgpu::Face>,
    blend: wgpu::BlendState,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: depth_state(depth_write),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

pub(crate) fn create_scene_resources(device: &wgpu::Device) -> SceneResources {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let ground_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("ground_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::GROUND_WGSL.into()),
    });
    let ornament_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("ornament_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::ORNAMENTS_WGSL.into()),
    });
    let sprite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("sprite_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::SPRITES_WGSL.into()),
    });

    let ground_pipeline = make_scene_pipeline(
        device,
        "ground_pipeline",
        &layout,
        &ground_shader,
        "vs_ground",
        "fs_ground",
        &[mesh_layout()],
        None,
        wgpu::BlendState::REPLACE,
        true,
    );
    let ornament_pipeline = make_scene_pipeline(
        device,
        "ornament_pipeline",
        &layout,
        &ornament_shader,
        "vs_ornament",
        "fs_ornament",
        &[
            mesh_layout(),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<OrnamentInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &ORNAMENT_ATTRS,
            },
        ],
        Some(wgpu::Face::Back),
        wgpu::BlendState::REPLACE,
        true,
    );
    // Sprites are depth-tested against the solid geometry but never occlude
    // each other; additive blending makes their draw order irrelevant.
    let sprite_pipeline = make_scene_pipeline(
        device,
        "sprite_pipeline",
        &layout,
        &sprite_shader,
        "vs_sprite",
        "fs_sprite",
        &[wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &SPRITE_ATTRS,
        }],
        None,
        ADDITIVE,
        false,
    );

    SceneResources {
        uniform_buffer,
        bind_group,
        ground_pipeline,
        ornament_pipeline,
        sprite_pipeline,
    }
}

/// A vertex buffer sized once for a fixed instance count.
pub(crate) fn instance_buffer(device: &wgpu::Device, label: &str, bytes: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: bytes.max(16),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
