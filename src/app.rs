use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::config::SceneSettings;
use crate::rendering::engine::RenderEngine;
use crate::rendering::uniforms::{apply_rig_uniforms, LayoutUniforms, SpriteProps, SpriteUniforms};
use crate::world::behavior::{Behavior, RandomSource};
use crate::world::pose::pose_rig;
use crate::world::projection::FloorProjection;
use crate::world::rig::Rig;

/// Per-frame simulation and uniform binding, independent of any window.
///
/// Each [`advance`](Self::advance) runs the behavior tick first, then poses the
/// rig with the sprite's animation clock and binds the result.
pub struct SpriteDriver<R: RandomSource> {
    settings: SceneSettings,
    behavior: Behavior<R>,
    base_rig: Rig,
    uniforms: SpriteUniforms,
    anim_time: f32,
}

impl<R: RandomSource> SpriteDriver<R> {
    pub fn new(settings: SceneSettings, now_ms: f64, rng: R) -> Self {
        let viewport = &settings.viewport;
        let projection = FloorProjection::new(
            viewport.width as f32,
            viewport.height as f32,
            settings.behavior.floor_radius,
        );
        let behavior = Behavior::new(settings.behavior.clone(), projection, now_ms, rng);
        Self::with_behavior(settings, behavior)
    }

    /// Drive an existing behavior, e.g. one resumed with [`Behavior::from_state`].
    pub fn with_behavior(settings: SceneSettings, behavior: Behavior<R>) -> Self {
        let viewport = &settings.viewport;
        let uniforms = SpriteUniforms::new(
            &settings.camera,
            &settings.light,
            Vec2::new(viewport.width as f32, viewport.height as f32),
        );
        Self {
            settings,
            behavior,
            base_rig: Rig::default(),
            uniforms,
            anim_time: 0.0,
        }
    }

    pub fn behavior(&self) -> &Behavior<R> {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut Behavior<R> {
        &mut self.behavior
    }

    pub fn anim_time(&self) -> f32 {
        self.anim_time
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        let (w, h) = (size.width as f32, size.height as f32);
        self.behavior.set_viewport(w, h);
        self.uniforms.resolution = [w, h];
    }

    /// Advance one rendered frame and return the uniforms to draw it with.
    pub fn advance(&mut self, now_ms: f64) -> (SpriteUniforms, LayoutUniforms) {
        let snapshot = self.behavior.tick(now_ms);

        self.anim_time += self.settings.animation.time_step;
        let rig = pose_rig(&self.base_rig, snapshot.mode, self.anim_time);

        let projection = *self.behavior.projection();
        let props = SpriteProps {
            position: Some(projection.world_to_sdf_position(snapshot.position)),
            rotation: Some(snapshot.rotation),
            camera_pos: Some(self.settings.camera.position),
            camera_target: Some(self.settings.camera.target),
            light_dir: Some(self.settings.light.direction),
        };
        self.uniforms.time = self.anim_time;
        apply_rig_uniforms(Some(&mut self.uniforms), Some(&rig), Some(&props));

        let placement = projection.world_to_screen(snapshot.position);
        let layout = LayoutUniforms::new(&projection, &placement, self.settings.viewport.sprite_fraction);
        (self.uniforms, layout)
    }
}

/// Window, GPU engine and the sprite driver glued to winit's event loop.
pub struct App<R: RandomSource> {
    driver: SpriteDriver<R>,
    window: Option<Arc<Window>>,
    renderer: Option<RenderEngine>,
    start: Instant,
}

impl<R: RandomSource> App<R> {
    pub fn new(settings: SceneSettings, rng: R) -> Self {
        Self {
            driver: SpriteDriver::new(settings, 0.0, rng),
            window: None,
            renderer: None,
            start: Instant::now(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl<R: RandomSource> ApplicationHandler for App<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let viewport = &self.driver.settings.viewport;
        let attributes = Window::default_attributes()
            .with_title(crate::APP_NAME)
            .with_inner_size(PhysicalSize::new(viewport.width, viewport.height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(RenderEngine::new(window.clone())) {
            Ok(renderer) => {
                self.driver.resize(renderer.size());
                self.renderer = Some(renderer);
                self.window = Some(window.clone());
                window.request_redraw();
                info!("Sprite window ready");
            }
            Err(e) => {
                error!("Render engine startup failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map_or(true, |w| w.id() != window_id) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, releasing GPU resources");
                drop(self.renderer.take());
                self.window = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
                if size.width > 0 && size.height > 0 {
                    self.driver.resize(size);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.driver
                    .behavior_mut()
                    .pointer_move(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                let now = self.now_ms();
                self.driver.behavior_mut().pointer_leave(now);
            }
            WindowEvent::RedrawRequested => {
                let now = self.now_ms();
                let (sprite, layout) = self.driver.advance(now);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.render_frame(&sprite, &layout);
                }
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
