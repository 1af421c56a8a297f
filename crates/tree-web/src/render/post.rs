use super::helpers::{self, HDR_FORMAT};
use super::targets::RenderTargets;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) exposure: f32,
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) threshold: f32,
}

/// Which stage of the bloom chain a uniform block feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PostStage {
    /// Bright pass and composite; no blur direction.
    Base,
    BlurH,
    BlurV,
}

impl PostStage {
    pub(crate) const ALL: [PostStage; 3] = [PostStage::Base, PostStage::BlurH, PostStage::BlurV];

    pub(crate) fn blur_dir(self) -> [f32; 2] {
        match self {
            PostStage::Base => [0.0, 0.0],
            PostStage::BlurH => [1.0, 0.0],
            PostStage::BlurV => [0.0, 1.0],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    /// One block per stage. Queue writes land before the encoder runs, so a
    /// shared buffer would leave every pass seeing the last write.
    pub(crate) uniforms: [wgpu::Buffer; 3],
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

impl PostResources {
    pub(crate) fn uniform(&self, stage: PostStage) -> &wgpu::Buffer {
        &self.uniforms[stage.index()]
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::POST_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_layout_entry(0),
            helpers::sampler_layout_entry(1),
            helpers::uniform_layout_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[helpers::texture_layout_entry(0), helpers::sampler_layout_entry(1)],
    });
    let uniforms = PostStage::ALL.map(|stage| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(match stage {
                PostStage::Base => "post_uniforms",
                PostStage::BlurH => "post_uniforms_blur_h",
                PostStage::BlurV => "post_uniforms_blur_v",
            }),
            size: std::mem::size_of::<PostUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    });
    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        "bright_pipeline",
        &pl_single,
        &post_shader,
        "fs_bright",
        HDR_FORMAT,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        "blur_pipeline",
        &pl_single,
        &post_shader,
        "fs_blur",
        HDR_FORMAT,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        "composite_pipeline",
        &pl_composite,
        &post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        uniforms,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

/// Bind groups tying the post pipelines to the current targets; rebuilt on
/// every resize.
pub(crate) struct PostBindGroups {
    pub(crate) hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a: wgpu::BindGroup,
    pub(crate) from_bloom_b: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

impl PostBindGroups {
    pub(crate) fn new(
        device: &wgpu::Device,
        post: &PostResources,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let with_uniform = |label: &str, view: &wgpu::TextureView, stage: PostStage| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &post.bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: post.uniform(stage).as_entire_binding(),
                    },
                ],
            })
        };
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: &post.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            hdr: with_uniform("bg_hdr", &targets.hdr_view, PostStage::Base),
            from_bloom_a: with_uniform("bg_from_bloom_a", &targets.bloom_a_view, PostStage::BlurH),
            from_bloom_b: with_uniform("bg_from_bloom_b", &targets.bloom_b_view, PostStage::BlurV),
            bloom_a_only,
        }
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
