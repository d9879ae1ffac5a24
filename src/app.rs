//! Application event loop.
//!
//! A scene is provided through a [`SceneFlow`] implementation built by an
//! async constructor, so meshes and textures can be loaded before the first
//! frame. The loop owns camera, HUD and renderer; the flow owns the scene
//! and its per-frame logic.
//!
//! Each frame: distribute input, advance the camera and the flow by the
//! elapsed time, render, and (with vsync off) sleep the remainder of the
//! frame budget.

use std::{pin::Pin, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    camera::{Camera, CameraController},
    context::{Context, InitContext},
    hud::Hud,
    renderer::{Renderer, SceneLayouts},
    scene::Scene,
    settings::{RenderSettings, WindowConfig},
};

/// Frame cap used when vsync is off.
pub const TARGET_FPS: u32 = 75;

const CAMERA_SPEED: f32 = 3.0;
const MOUSE_SENSITIVITY: f32 = 0.2;

/// A running scene: owns the [`Scene`] and reacts to time and input.
pub trait SceneFlow {
    /// Called once before the first frame; place the camera, set the clear
    /// colour.
    fn on_init(&mut self, _ctx: &mut Context, _camera: &mut Camera) {}

    /// Advance scene state by the elapsed frame time.
    fn on_update(&mut self, ctx: &Context, dt: Duration);

    /// Keys not consumed by the camera or the settings shortcuts.
    fn on_key(&mut self, _ctx: &Context, _key: KeyCode, _pressed: bool) {}

    /// The scene to draw this frame.
    fn scene(&self) -> &Scene;
}

/// Async factory for the initial [`SceneFlow`], run once on startup with
/// access to device, queue and the bind group layouts scenes build their
/// materials and skybox against.
pub type FlowConstructor = Box<
    dyn FnOnce(
        InitContext,
        SceneLayouts,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn SceneFlow>>>>>,
>;

struct AppState {
    ctx: Context,
    renderer: Renderer,
    camera: Camera,
    controller: CameraController,
    hud: Hud,
    flow: Box<dyn SceneFlow>,
    cursor: (f32, f32),
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    window_config: WindowConfig,
    settings: RenderSettings,
    constructor: Option<FlowConstructor>,
    state: Option<AppState>,
    last_time: Instant,
}

impl App {
    fn new(
        window_config: WindowConfig,
        settings: RenderSettings,
        constructor: FlowConstructor,
    ) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            window_config,
            settings,
            constructor: Some(constructor),
            state: None,
            last_time: Instant::now(),
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };
        let frame_start = Instant::now();
        let dt = self.last_time.elapsed();
        self.last_time = frame_start;

        state
            .controller
            .update_camera(&mut state.camera, dt);
        state.flow.on_update(&state.ctx, dt);

        match state.renderer.render(
            &state.ctx,
            state.flow.scene(),
            &state.camera,
            Some(&state.hud),
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = state.ctx.window.inner_size();
                state.ctx.resize(size.width, size.height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::error!("unable to render: {}", e),
        }

        if !self.window_config.vsync {
            sync_frame(frame_start);
        }
        state.ctx.window.request_redraw();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let Some(state) = &mut self.state else {
            return;
        };
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state.is_pressed();

        if code == KeyCode::Escape && pressed {
            event_loop.exit();
            return;
        }
        if state.controller.process_keyboard(code, pressed) {
            return;
        }
        if pressed && !event.repeat {
            let settings = &mut state.ctx.settings;
            match code {
                KeyCode::KeyH => {
                    settings.toggle_hud();
                    return;
                }
                KeyCode::KeyF => {
                    settings.toggle_fog();
                    return;
                }
                KeyCode::Digit8 => {
                    settings.toggle_msaa();
                    return;
                }
                KeyCode::Digit9 => {
                    settings.toggle_mag_linear();
                    return;
                }
                KeyCode::Digit0 => {
                    settings.toggle_min_trilinear();
                    return;
                }
                KeyCode::Digit1 => {
                    settings.set_lod_bias(-5);
                    return;
                }
                KeyCode::Digit2 => {
                    settings.set_lod_bias(0);
                    return;
                }
                KeyCode::Digit3 => {
                    settings.set_lod_bias(2);
                    return;
                }
                _ => {}
            }
        }
        state.flow.on_key(&state.ctx, code, pressed);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let constructor = match self.constructor.take() {
            Some(constructor) => constructor,
            // resumed fires again when the window regains focus on some
            // platforms; the flow is already built then.
            None => return,
        };

        let attributes = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("cannot create the window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let window_config = self.window_config.clone();
        let settings = self.settings;
        let init = self.async_runtime.block_on(async move {
            let mut ctx = Context::new(window, &window_config, settings).await?;
            let renderer = Renderer::new(&ctx);
            let mut flow = constructor(InitContext::from(&ctx), renderer.layouts()).await?;
            let mut camera = Camera::new();
            flow.on_init(&mut ctx, &mut camera);
            anyhow::Ok((ctx, renderer, camera, flow))
        });
        let (ctx, renderer, camera, flow) = match init {
            Ok(init) => init,
            Err(e) => {
                log::error!("app initialization failed: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let size = ctx.window.inner_size();
        self.state = Some(AppState {
            hud: Hud::new(size.width, size.height),
            controller: CameraController::new(CAMERA_SPEED, MOUSE_SENSITIVITY),
            ctx,
            renderer,
            camera,
            flow,
            cursor: (0.0, 0.0),
        });
        self.last_time = Instant::now();
        if let Some(state) = &self.state {
            state.ctx.window.request_redraw();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            state.controller.process_mouse(dx, dy);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.ctx.resize(size.width, size.height);
                    state.hud.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(state) = &mut self.state {
                    state.cursor = (position.x as f32, position.y as f32);
                    state.hud.set_cursor(state.cursor.0, state.cursor.1);
                }
            }
            WindowEvent::MouseInput { state: button_state, button, .. } => {
                if let Some(state) = &mut self.state {
                    if button == MouseButton::Left {
                        let pressed = button_state == ElementState::Pressed;
                        let consumed = pressed
                            && state.ctx.settings.hud
                            && state.hud.handle_click(
                                state.cursor.0,
                                state.cursor.1,
                                &mut state.ctx.settings,
                            );
                        // A click on the HUD must not start a camera drag.
                        state.controller.set_left_button(pressed && !consumed);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Busy-wait the rest of the frame budget in millisecond naps.
fn sync_frame(frame_start: Instant) {
    let budget = Duration::from_secs(1) / TARGET_FPS;
    while frame_start.elapsed() < budget {
        std::thread::yield_now();
        std::thread::sleep(Duration::from_millis(1));
    }
}

/// Build the window and event loop and run the scene until exit.
pub fn run(
    window_config: WindowConfig,
    settings: RenderSettings,
    constructor: FlowConstructor,
) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: could not initialize logger: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(window_config, settings, constructor)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
