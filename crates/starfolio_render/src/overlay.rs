//! egui overlay for planet labels and the loading screen
//!
//! Labels are projected from world space by the caller (see
//! [`project_label`]) and painted on a background layer so they sit on top of
//! the 3D scene without capturing the pointer.

use starfolio_core::BodyLabel;
use starfolio_math::{Mat4, Vec2};

use crate::camera::CameraProjection;

/// World-space text height of a planet name
pub const NAME_TEXT_SIZE: f32 = 0.5;
/// World-space text height of a planet's info line
pub const INFO_TEXT_SIZE: f32 = 0.3;
/// Info text wraps at this many world units
pub const INFO_WRAP_WIDTH: f32 = 5.0;

/// Labels smaller than this are not drawn
const MIN_TEXT_PX: f32 = 2.0;
const MAX_TEXT_PX: f32 = 128.0;

/// A line of text positioned in physical pixels
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenLabel {
    pub text: String,
    /// Center of the text, physical pixels from the top-left
    pub position: Vec2,
    pub size_px: f32,
    /// Wrap width in physical pixels, `None` for a single line
    pub wrap_px: Option<f32>,
    pub color: [u8; 4],
}

/// What the loading screen shows
#[derive(Clone, Debug, PartialEq)]
pub struct LoadingView {
    pub text: String,
    /// Fraction of the boot delay elapsed
    pub progress: f32,
    /// Opacity of the pulsing placeholder text
    pub alpha: f32,
}

/// Project a body's label block into screen labels
///
/// Text keeps its world-space size, so it shrinks with distance. Returns
/// nothing when the anchor is behind the camera.
pub fn project_label(
    projection: &CameraProjection,
    view_proj: Mat4,
    label: &BodyLabel,
    viewport: Vec2,
) -> Vec<ScreenLabel> {
    let focal = projection.focal_length_px(viewport.y);
    let mut out = Vec::with_capacity(2);

    if let Some(point) = projection.world_to_screen(view_proj, label.name_anchor, viewport) {
        let size_px = NAME_TEXT_SIZE * focal / point.depth;
        if size_px >= MIN_TEXT_PX {
            out.push(ScreenLabel {
                text: label.name.clone(),
                position: point.position,
                size_px: size_px.min(MAX_TEXT_PX),
                wrap_px: None,
                color: [255, 255, 255, 255],
            });
        }
    }

    if label.info.is_empty() {
        return out;
    }
    if let Some(point) = projection.world_to_screen(view_proj, label.info_anchor, viewport) {
        let scale = focal / point.depth;
        let size_px = INFO_TEXT_SIZE * scale;
        if size_px >= MIN_TEXT_PX {
            out.push(ScreenLabel {
                text: label.info.clone(),
                position: point.position,
                size_px: size_px.min(MAX_TEXT_PX),
                wrap_px: Some(INFO_WRAP_WIDTH * scale),
                color: [255, 255, 255, 255],
            });
        }
    }
    out
}

/// egui context, winit integration and wgpu renderer
pub struct Overlay {
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Overlay {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::WHITE);
        egui_ctx.set_visuals(visuals);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// Paint labels and, while booting, the loading screen on top of `view`
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        labels: &[ScreenLabel],
        loading: Option<&LoadingView>,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let pixels_per_point = screen_descriptor.pixels_per_point.max(0.01);

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !labels.is_empty() {
                let painter = ctx.layer_painter(egui::LayerId::new(
                    egui::Order::Background,
                    egui::Id::new("planet_labels"),
                ));
                for label in labels {
                    paint_label(&painter, label, pixels_per_point);
                }
            }

            if let Some(loading) = loading {
                paint_loading(ctx, loading);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn paint_label(painter: &egui::Painter, label: &ScreenLabel, pixels_per_point: f32) {
    let [r, g, b, a] = label.color;
    let color = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
    let center = egui::pos2(
        label.position.x / pixels_per_point,
        label.position.y / pixels_per_point,
    );
    let font_id = egui::FontId::proportional(label.size_px / pixels_per_point);

    match label.wrap_px {
        Some(wrap) => {
            let galley = painter.layout(label.text.clone(), font_id, color, wrap / pixels_per_point);
            let top_left = center - galley.size() * 0.5;
            painter.galley(top_left, galley, color);
        }
        None => {
            painter.text(center, egui::Align2::CENTER_CENTER, &label.text, font_id, color);
        }
    }
}

fn paint_loading(ctx: &egui::Context, loading: &LoadingView) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("loading_screen"),
    ));
    let screen = ctx.screen_rect();
    painter.rect_filled(screen, 0.0, egui::Color32::BLACK);

    let alpha = (loading.alpha.clamp(0.0, 1.0) * 255.0) as u8;
    painter.text(
        screen.center(),
        egui::Align2::CENTER_CENTER,
        &loading.text,
        egui::FontId::proportional(24.0),
        egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha),
    );

    let bar_width = screen.width() * 0.3;
    let track = egui::Rect::from_center_size(
        screen.center() + egui::vec2(0.0, 32.0),
        egui::vec2(bar_width, 4.0),
    );
    painter.rect_filled(track, 0.0, egui::Color32::from_gray(40));
    let mut fill = track;
    fill.set_width(bar_width * loading.progress.clamp(0.0, 1.0));
    painter.rect_filled(fill, 0.0, egui::Color32::from_gray(200));
}
