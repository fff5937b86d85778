use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::game::config::HanoiConfig;
use crate::game::input::{GameAction, InputState, KeyBind};
use crate::game::state::{HanoiState, Intent};
use crate::hanoi::error::HanoiError;
use crate::render::engine::RenderEngine;
use crate::sim::tick::GameLoop;
use crate::ui::board::{draw_board, fps_overlay};
use crate::ui::controls::{control_panel, CONTROLS_HEIGHT};
use crate::ui::settings::settings_menu;

fn is_modifier(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::ShiftLeft
            | KeyCode::ShiftRight
            | KeyCode::ControlLeft
            | KeyCode::ControlRight
            | KeyCode::AltLeft
            | KeyCode::AltRight
    )
}

pub struct App {
    engine: Option<RenderEngine>,
    config: HanoiConfig,
    state: HanoiState,
    input: InputState,
    game_loop: GameLoop,
    settings_open: bool,
    rebinding: Option<GameAction>,
    fatal: Option<String>,
}

impl App {
    pub fn new(config: HanoiConfig, disk_count: u32) -> Result<Self, HanoiError> {
        let state = HanoiState::new(&config, disk_count)?;
        let input = InputState::new(config.key_bindings.clone());
        let game_loop = GameLoop::new(config.animation.tick_rate);
        Ok(Self {
            engine: None,
            config,
            state,
            input,
            game_loop,
            settings_open: false,
            rebinding: None,
            fatal: None,
        })
    }

    /// Set when the app shut down because of an unrecoverable error.
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, message: String) {
        log::error!("{message}");
        self.fatal = Some(message);
        event_loop.exit();
    }

    fn on_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        if pressed && !is_modifier(code) {
            if let Some(action) = self.rebinding.take() {
                if code != KeyCode::Escape {
                    let bind = KeyBind {
                        code,
                        shift: self.input.shift_held,
                    };
                    log::info!("{} bound to {}", action.display_name(), bind.display_name());
                    self.input.rebind(action, bind);
                    self.config.key_bindings.insert(action, bind);
                }
                return;
            }
        }
        if repeat {
            return;
        }
        self.input.on_key_event(code, pressed);
    }

    fn apply_action(&mut self, action: GameAction) {
        if action == GameAction::OpenSettings {
            self.settings_open = !self.settings_open;
            if !self.settings_open {
                self.rebinding = None;
                self.config.save();
            }
            return;
        }
        if let Some(intent) = Intent::from_action(action) {
            self.state.handle(intent);
        }
    }

    fn run_ticks(&mut self, event_loop: &ActiveEventLoop) {
        let Some(dt) = self.game_loop.begin_frame() else {
            return;
        };
        for _ in 0..self.game_loop.accumulate(dt) {
            if let Err(e) = self.state.tick() {
                self.fail(event_loop, format!("stacking invariant violated: {e}"));
                return;
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        let mut intents = Vec::new();
        let result = engine.run_frame(|ctx| {
            let frame = self.state.frame();
            draw_board(ctx, &frame);
            intents = control_panel(ctx, &frame);
            if self.config.debug.show_fps {
                fps_overlay(ctx, self.game_loop.fps, self.game_loop.ups);
            }
            settings_menu(
                ctx,
                &mut self.settings_open,
                &mut self.config,
                &self.input,
                &mut self.rebinding,
            );
        });

        match result {
            Ok(()) => self.game_loop.frame_presented(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => engine.gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, "GPU out of memory".to_string());
                return;
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }

        self.state.set_ticks_per_move(self.config.animation.ticks_per_move());
        self.state.set_log_moves(self.config.debug.log_moves);
        for intent in intents {
            self.state.handle(intent);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Torre de Hanoi")
            .with_resizable(false)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height + CONTROLS_HEIGHT,
            ));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, format!("failed to create window: {e}")),
        };
        match RenderEngine::new(window) {
            Ok(engine) => self.engine = Some(engine),
            Err(e) => self.fail(event_loop, e.to_string()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = match self.engine.as_mut() {
            Some(engine) => engine.egui.on_window_event(&engine.gpu.window, &event),
            None => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(engine) = &mut self.engine {
                    engine.gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let egui_focused = self.engine.as_ref().is_some_and(|e| e.egui.wants_keyboard_input());
                if consumed && egui_focused && self.rebinding.is_none() {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.on_key(code, event.state.is_pressed(), event.repeat);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.run_ticks(event_loop);

        for action in self.input.pressed_actions() {
            self.apply_action(action);
        }
        self.input.end_frame();

        if let Some(engine) = &self.engine {
            engine.gpu.window.request_redraw();
        }
    }
}
