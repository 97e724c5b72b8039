//! Starfolio - interactive 3D portfolio space scene
//!
//! A steerable rocket flies through a starfield past planets that reveal
//! portfolio details when hovered.

use std::path::Path;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use starfolio::config::AppConfig;
use starfolio::input::{InputAction, InputMapper};
use starfolio::scene::{SceneBuilder, SpaceScene};
use starfolio::systems::{
    open_sink, AssetSystem, RenderError, RenderSystem, SimulationSystem, WindowSystem,
};
use starfolio_core::{AudioSink, BodyLabel, DirtyFlags, Scene, SceneLoadError};
use starfolio_input::{PointerPicker, RocketController};
use starfolio_render::LoadingView;

/// Main application state
struct App {
    config: AppConfig,
    scene: SpaceScene,
    /// Labels of revealed planets, refreshed when the world marks them dirty
    labels: Vec<BodyLabel>,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    assets: AssetSystem,
    audio: Box<dyn AudioSink>,
    controller: RocketController,
    picker: PointerPicker,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, SceneLoadError> {
        let template = Scene::load(&config.scene.path).unwrap_or_else(|e| {
            log::warn!("Failed to load scene '{}': {}. Starting empty.", config.scene.path, e);
            Scene::new("empty")
        });
        let scene = Self::build_scene(&config, &template)?;

        let simulation = SimulationSystem::new(
            &config.motion,
            std::time::Duration::from_millis(config.scene.boot_delay_ms),
        );

        Ok(Self {
            labels: Vec::new(),
            window: None,
            render: None,
            simulation,
            assets: AssetSystem::new(),
            audio: open_sink(&config.audio),
            controller: RocketController::new(config.rocket.control_scheme),
            picker: PointerPicker::new(),
            scene,
            config,
        })
    }

    fn build_scene(config: &AppConfig, template: &Scene) -> Result<SpaceScene, SceneLoadError> {
        let mut builder = SceneBuilder::new(config.world_settings())
            .with_decorations(config.planets.decorations);
        if let Some(seed) = config.scene.seed {
            builder = builder.with_seed(seed);
        }
        if config.debug.show_axes {
            builder = builder.with_axes(config.debug.axes_size);
        }
        if let Some(color) = config.rendering.background_color {
            builder = builder.with_background(color);
        }
        builder.build(template)
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ResetScene => self.scene.world.reset(),
        }
    }

    /// Re-pick the body under the cursor and feed changes to the world
    fn update_picking(&mut self) {
        let Some(render) = &self.render else {
            return;
        };
        let world = &self.scene.world;
        let inv_view_proj = render.view_projection(world.camera()).inverse();
        let events = self
            .picker
            .pick_world(world, inv_view_proj, render.viewport());
        for event in events {
            self.scene.world.handle_pointer(event);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.simulation.is_booting() {
            self.update_picking();
        }
        self.simulation.update(&mut self.scene.world, self.audio.as_mut());

        for loaded in self.assets.poll() {
            if loaded.path == Path::new(&self.config.rocket.model_path) {
                if let Some(render) = &mut self.render {
                    render.set_rocket_mesh(&loaded.mesh);
                }
            }
        }

        if self.scene.world.dirty().contains(DirtyFlags::LABELS) {
            self.labels = self.scene.world.labels();
        }
        self.scene.world.clear_dirty();

        let loading = self.simulation.is_booting().then(|| {
            let boot = self.simulation.boot();
            LoadingView {
                text: self.config.scene.loading_text.clone(),
                progress: boot.progress(),
                alpha: boot.placeholder_alpha(),
            }
        });

        let Some(window) = &self.window else {
            return;
        };
        let actor = self.scene.world.actor();
        window.update_title(actor.position(), actor.engine_on());

        if let Some(render) = &mut self.render {
            match render.render_frame(window.window(), &self.scene, &self.labels, loading.as_ref()) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render = match RenderSystem::new(window.window().clone(), &self.config) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };
        render.upload_static(&self.scene);

        if let Err(e) = self.assets.request_mesh(&self.config.rocket.model_path) {
            log::warn!("Rocket model will not load: {}", e);
        }

        // Boot timing starts once there is something to show it on
        self.simulation.reset_clock();
        window.request_redraw();

        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(render)) = (&self.window, &mut self.render) {
            render.handle_window_event(window.window(), &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, event.repeat) {
                        self.handle_action(action, event_loop);
                        return;
                    }
                    if self.simulation.is_booting() {
                        return;
                    }
                    if let Some(command) = self.controller.process_keyboard(key, event.state, event.repeat) {
                        self.scene.world.handle_command(command);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.picker.cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(event) = self.picker.cursor_left() {
                    self.scene.world.handle_pointer(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = self.picker.process_mouse_button(button, state) {
                    self.scene.world.handle_pointer(event);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging is configured from the config file, so load it first
    let loaded = AppConfig::load();
    let level = match &loaded {
        Ok(config) => config.debug.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Starfolio");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
