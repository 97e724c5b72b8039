//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Mesh and primitive pipelines
//! - The egui overlay for labels and the loading screen

use std::sync::Arc;

use starfolio_core::{Actor, BodyLabel, CameraRig, MeshAsset};
use starfolio_math::{Euler, Mat4, Vec2, Vec3};
use starfolio_render::{
    camera::CameraProjection,
    context::{ContextError, RenderContext},
    geometry::{uv_sphere, MeshData},
    overlay::{project_label, LoadingView, Overlay, ScreenLabel},
    pipeline::{
        GpuMesh, MeshInstance, MeshPipeline, PrimitiveBlend, PrimitivePipeline, PrimitiveUniforms,
        SceneUniforms,
    },
};
use winit::window::Window;

use crate::config::{AppConfig, RenderingConfig, RocketConfig};
use crate::scene::SpaceScene;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// GPU setup failed
    Context(ContextError),
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Context(e) => write!(f, "Render setup failed: {}", e),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Model matrix for the rocket: actor transform, uniform scale, then the
/// model's own fixed rotation
pub fn rocket_matrix(actor: &Actor, config: &RocketConfig) -> Mat4 {
    let transform = actor.transform();
    Mat4::from_translation(transform.position)
        * Mat4::from_quat(transform.rotation.to_quat())
        * Mat4::from_scale(Vec3::splat(config.model_scale))
        * Mat4::from_quat(Euler::from_array(config.model_rotation).to_quat())
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    mesh_pipeline: MeshPipeline,
    star_pipeline: PrimitivePipeline,
    ring_pipeline: PrimitivePipeline,
    particle_pipeline: PrimitivePipeline,
    axes_pipeline: PrimitivePipeline,
    overlay: Overlay,
    /// Unit sphere shared by every planet
    sphere: GpuMesh,
    rocket: Option<GpuMesh>,
    projection: CameraProjection,
    rendering: RenderingConfig,
    rocket_config: RocketConfig,
    instances: Vec<MeshInstance>,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window.clone(), config.window.vsync))?;
        let device = &context.device;
        let format = context.format();

        let mut mesh_pipeline = MeshPipeline::new(device, format);
        mesh_pipeline.ensure_depth_texture(device, context.size.width, context.size.height);

        let star_pipeline = PrimitivePipeline::new(
            device,
            format,
            wgpu::PrimitiveTopology::PointList,
            PrimitiveBlend::Alpha,
            "Starfield",
        );
        let ring_pipeline = PrimitivePipeline::new(
            device,
            format,
            wgpu::PrimitiveTopology::TriangleList,
            PrimitiveBlend::Alpha,
            "Planet Rings",
        );
        let particle_pipeline = PrimitivePipeline::new(
            device,
            format,
            wgpu::PrimitiveTopology::PointList,
            PrimitiveBlend::Additive,
            "Planet Particles",
        );
        let axes_pipeline = PrimitivePipeline::new(
            device,
            format,
            wgpu::PrimitiveTopology::LineList,
            PrimitiveBlend::Alpha,
            "Axes",
        );

        let sphere = GpuMesh::upload(
            device,
            &uv_sphere(1.0, config.planets.sphere_segments, config.planets.sphere_rings),
            "Planet Sphere",
        );
        let overlay = Overlay::new(&window, device, format);

        Ok(Self {
            context,
            mesh_pipeline,
            star_pipeline,
            ring_pipeline,
            particle_pipeline,
            axes_pipeline,
            overlay,
            sphere,
            rocket: None,
            projection: CameraProjection::new(config.camera.fov, config.camera.near, config.camera.far),
            rendering: config.rendering.clone(),
            rocket_config: config.rocket.clone(),
            instances: Vec::new(),
        })
    }

    /// Upload geometry that never changes after the scene is built
    pub fn upload_static(&mut self, scene: &SpaceScene) {
        let ctx = &self.context;
        self.star_pipeline
            .upload(&ctx.device, &ctx.queue, scene.starfield.vertices());
        self.axes_pipeline.upload(&ctx.device, &ctx.queue, &scene.axes);
        log::info!(
            "Uploaded {} stars and {} axis vertices",
            scene.starfield.len(),
            scene.axes.len()
        );
    }

    /// Start drawing the rocket with `mesh`
    pub fn set_rocket_mesh(&mut self, mesh: &MeshAsset) {
        let data = MeshData::from_asset(mesh);
        self.rocket = Some(GpuMesh::upload(&self.context.device, &data, "Rocket"));
        log::info!("Rocket mesh ready ({} triangles)", data.triangle_count());
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.mesh_pipeline
            .ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Let the overlay see a window event; true if it consumed it
    pub fn handle_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.overlay.handle_window_event(window, event).consumed
    }

    /// View-projection for the follow camera at the current aspect ratio
    pub fn view_projection(&self, camera: &CameraRig) -> Mat4 {
        self.projection
            .view_projection(camera, self.context.aspect_ratio())
    }

    /// Surface size in physical pixels
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(
            self.context.size.width as f32,
            self.context.size.height as f32,
        )
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        window: &Window,
        scene: &SpaceScene,
        labels: &[BodyLabel],
        loading: Option<&LoadingView>,
    ) -> Result<(), RenderError> {
        let world = &scene.world;
        let view_proj = self.view_projection(world.camera());
        let viewport = self.viewport();

        let scene_uniforms = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: self.rendering.light_dir,
            ambient: self.rendering.ambient_strength,
            light_color: self.rendering.light_color,
            light_intensity: self.rendering.light_intensity,
            camera_pos: world.camera().position().to_array(),
            _padding: 0.0,
        };
        self.mesh_pipeline
            .update_uniforms(&self.context.queue, &scene_uniforms);

        let primitive_uniforms = PrimitiveUniforms {
            view_proj: view_proj.to_cols_array_2d(),
        };
        for pipeline in [
            &self.star_pipeline,
            &self.ring_pipeline,
            &self.particle_pipeline,
            &self.axes_pipeline,
        ] {
            pipeline.update_uniforms(&self.context.queue, &primitive_uniforms);
        }

        // Planets first, then the rocket as the last instance
        self.instances.clear();
        for (_, body) in world.bodies() {
            let transform = body.transform();
            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(body.radius()),
                transform.rotation.to_quat(),
                transform.position,
            );
            self.instances
                .push(MeshInstance::new(model, body.color(), body.emissive()));
        }
        let planet_count = self.instances.len() as u32;
        if self.rocket.is_some() {
            self.instances.push(MeshInstance::new(
                rocket_matrix(world.actor(), &self.rocket_config),
                self.rocket_config.color,
                [0.0; 3],
            ));
        }
        self.mesh_pipeline
            .write_instances(&self.context.device, &self.context.queue, &self.instances);

        self.ring_pipeline
            .upload(&self.context.device, &self.context.queue, &scene.ring_vertices());
        self.particle_pipeline
            .upload(&self.context.device, &self.context.queue, &scene.particle_vertices());

        let screen_labels: Vec<ScreenLabel> = labels
            .iter()
            .flat_map(|label| project_label(&self.projection, view_proj, label, viewport))
            .collect();

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let depth_view = self
                .mesh_pipeline
                .depth_view()
                .ok_or_else(|| RenderError::Other("depth texture missing".to_string()))?;
            let bg = scene.background;

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Opaque meshes write depth; everything after only tests against it
            self.mesh_pipeline
                .draw(&mut pass, &self.sphere, 0..planet_count);
            if let Some(rocket) = &self.rocket {
                self.mesh_pipeline
                    .draw(&mut pass, rocket, planet_count..planet_count + 1);
            }
            self.star_pipeline.draw(&mut pass);
            self.ring_pipeline.draw(&mut pass);
            self.particle_pipeline.draw(&mut pass);
            self.axes_pipeline.draw(&mut pass);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.context.size.width, self.context.size.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.overlay.render(
            &self.context.device,
            &self.context.queue,
            &mut encoder,
            window,
            &view,
            &screen_descriptor,
            &screen_labels,
            loading,
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
