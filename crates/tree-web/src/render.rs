use crate::constants::{CLEAR_COLOR, EXPOSURE};
use fnv::FnvHashMap;
use tree_core::mesh;
use tree_core::{
    OrbitCamera, OrnamentInstance, OrnamentShape, SpriteInstance, TreeSession, GROUND_HALF_EXTENT,
    GROUND_MARGIN, LIGHT_DIR, LIGHT_INTENSITY,
};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;

use post::{PostBindGroups, PostResources, PostStage, PostUniforms};
use scene::{GpuMesh, SceneResources, SceneUniforms};
use targets::RenderTargets;

/// Instance buffer for one ornament group, drawn with its shape's mesh.
struct OrnamentBatch {
    shape: OrnamentShape,
    buffer: wgpu::Buffer,
    count: u32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,

    scene: SceneResources,
    sprite_buffer: wgpu::Buffer,
    sprite_count: u32,
    ornament_batches: Vec<OrnamentBatch>,
    meshes: FnvHashMap<OrnamentShape, GpuMesh>,
    ground: GpuMesh,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    bloom_strength: f32,
    bloom_threshold: f32,
}

impl GpuState {
    /// Instance and buffer sizes are fixed from the session's particle and
    /// ornament counts; they never change for the life of the scene.
    pub async fn new(canvas: web::HtmlCanvasElement, session: &TreeSession) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
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
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
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

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, format);
        let post_groups = PostBindGroups::new(&device, &post, &targets, &linear_sampler);
        let scene = scene::create_scene_resources(&device);

        let field = session.field();
        let sprite_buffer = scene::instance_buffer(
            &device,
            "sprite_instances",
            (field.len() * std::mem::size_of::<SpriteInstance>()) as u64,
        );
        let ornament_batches = session
            .groups()
            .iter()
            .map(|g| OrnamentBatch {
                shape: g.shape(),
                buffer: scene::instance_buffer(
                    &device,
                    g.name(),
                    (g.len() * std::mem::size_of::<OrnamentInstance>()) as u64,
                ),
                count: g.len() as u32,
            })
            .collect();

        let mut meshes = FnvHashMap::default();
        for g in session.groups() {
            meshes
                .entry(g.shape())
                .or_insert_with(|| GpuMesh::upload(&device, g.name(), &mesh::for_shape(g.shape())));
        }
        // The ground quad is placed at y = 0; the shader pins it to the
        // uniform's ground height.
        let ground = GpuMesh::upload(&device, "ground", &mesh::ground_quad(GROUND_HALF_EXTENT, 0.0));

        let cfg = session.config();
        log::info!(
            "[gpu] {}x{} {:?}; {} sprites, {} ornament groups",
            width,
            height,
            format,
            field.len(),
            session.groups().len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            post_groups,
            scene,
            sprite_buffer,
            sprite_count: field.len() as u32,
            ornament_batches,
            meshes,
            ground,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            bloom_strength: cfg.bloom_strength,
            bloom_threshold: cfg.bloom_threshold,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
            self.targets.recreate(&self.device, width, height);
            self.post_groups =
                PostBindGroups::new(&self.device, &self.post, &self.targets, &self.linear_sampler);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    /// Re-apply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn scene_uniforms(&self, session: &TreeSession, camera: &OrbitCamera, time_sec: f32) -> SceneUniforms {
        let (right, up) = camera.billboard_axes();
        let eye = camera.eye();
        let light = glam::Vec3::from(LIGHT_DIR).normalize_or_zero();
        SceneUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
            eye: eye.extend(1.0).to_array(),
            light_dir: light.extend(LIGHT_INTENSITY).to_array(),
            time: time_sec,
            progress: session.progress(),
            ground_y: session.config().tree.base_y() - GROUND_MARGIN,
            _pad: 0.0,
        }
    }

    fn write_instances(&self, session: &TreeSession) {
        let sprites = session.field().instances();
        if !sprites.is_empty() {
            self.queue
                .write_buffer(&self.sprite_buffer, 0, bytemuck::cast_slice(sprites));
        }
        for (batch, group) in self.ornament_batches.iter().zip(session.groups()) {
            if !group.is_empty() {
                self.queue
                    .write_buffer(&batch.buffer, 0, bytemuck::cast_slice(group.instances()));
            }
        }
    }

    fn write_post_uniforms(&self, time_sec: f32) {
        for stage in PostStage::ALL {
            let u = PostUniforms {
                resolution: self.targets.bloom_resolution(),
                time: time_sec,
                exposure: EXPOSURE,
                blur_dir: stage.blur_dir(),
                bloom_strength: self.bloom_strength,
                threshold: self.bloom_threshold,
            };
            self.queue
                .write_buffer(self.post.uniform(stage), 0, bytemuck::bytes_of(&u));
        }
    }

    pub fn render(
        &mut self,
        session: &TreeSession,
        camera: &OrbitCamera,
        time_sec: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = self.scene_uniforms(session, camera, time_sec);
        self.queue
            .write_buffer(&self.scene.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.write_instances(session);
        self.write_post_uniforms(time_sec);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: ground, ornaments, then additive sprites into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene.bind_group, &[]);

            rpass.set_pipeline(&self.scene.ground_pipeline);
            rpass.set_vertex_buffer(0, self.ground.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.ground.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.ground.index_count, 0, 0..1);

            rpass.set_pipeline(&self.scene.ornament_pipeline);
            for batch in &self.ornament_batches {
                let Some(mesh) = self.meshes.get(&batch.shape) else {
                    continue;
                };
                if batch.count == 0 {
                    continue;
                }
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, batch.buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..batch.count);
            }

            if self.sprite_count > 0 {
                rpass.set_pipeline(&self.scene.sprite_pipeline);
                rpass.set_vertex_buffer(0, self.sprite_buffer.slice(..));
                rpass.draw(0..6, 0..self.sprite_count);
            }
        }

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.hdr,
            None,
        );
        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        // Pass 5: composite + tone map to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
