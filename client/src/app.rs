use std::cell::RefCell;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use math_monsters::input::InputState;
use math_monsters::session::{GameEvent, Session};

use crate::audio::Audio;
use crate::game_ui;
use crate::render::{Renderer, viewport_size};

struct ClientState {
    renderer: Renderer,
    session: Session,
    input: InputState,
    audio: Audio,
    started: Instant,
    /// Number of the problem the answer field is showing.
    problem_seq: u64,
}

thread_local! {
    static STATE: RefCell<Option<ClientState>> = const { RefCell::new(None) };
}

fn with_state(f: impl FnOnce(&mut ClientState)) {
    STATE.with(|s| {
        if let Some(state) = s.borrow_mut().as_mut() {
            f(state);
        }
    });
}

fn fail_startup(what: &str, err: impl std::fmt::Display) {
    log::error!("{}: {}", what, err);
    game_ui::alert(&format!("{what}: {err}"));
}

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop
            .create_window(Window::default_attributes().with_title("Math Monsters"))
        {
            Ok(window) => Arc::new(window),
            Err(e) => return fail_startup("Could not open a window", e),
        };

        use winit::platform::web::WindowExtWebSys;
        let Some(canvas) = window.canvas() else {
            return fail_startup("Could not start the game", "no canvas");
        };
        let (w, h) = viewport_size();
        canvas.set_width(w);
        canvas.set_height(h);
        canvas
            .style()
            .set_css_text("width: 100%; height: 100%; display: block;");

        let attached = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                doc.get_element_by_id("wasm-container")?
                    .append_child(&canvas)
                    .ok()
            });
        if attached.is_none() {
            log::error!("Couldn't append canvas");
        }

        self.window = Some(window.clone());

        wasm_bindgen_futures::spawn_local(async move {
            let renderer = match Renderer::new(window.clone()).await {
                Ok(renderer) => renderer,
                Err(e) => return fail_startup("Graphics setup failed", e),
            };
            let session = match Session::new(rand::random()) {
                Ok(session) => session,
                Err(e) => return fail_startup("World generation failed", e),
            };
            let audio = Audio::new();
            audio.start_on_interaction();

            STATE.with(|s| {
                *s.borrow_mut() = Some(ClientState {
                    renderer,
                    session,
                    input: InputState::new(),
                    audio,
                    started: Instant::now(),
                    problem_seq: 0,
                })
            });
            install_page_handlers();
            window.request_redraw();
        });
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: winit::event::DeviceId, event: DeviceEvent) {
        let DeviceEvent::MouseMotion { delta } = event else {
            return;
        };
        with_state(|state| {
            state
                .input
                .handle_mouse_move(delta.0 as f32, delta.1 as f32)
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                with_state(|state| state.renderer.resize(size.width, size.height));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                with_state(|state| match event.state {
                    ElementState::Pressed if key == KeyCode::Escape => {
                        if let Some(d) = web_sys::window().and_then(|w| w.document()) {
                            d.exit_pointer_lock();
                        }
                        state.input.set_cursor_grabbed(false);
                    }
                    ElementState::Pressed => state.input.handle_key_press(key),
                    ElementState::Released => state.input.handle_key_release(key),
                });
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(canvas) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("wasm-container"))
                    .and_then(|c| c.first_element_child())
                {
                    canvas.request_pointer_lock();
                }
            }
            WindowEvent::RedrawRequested => {
                let mut restart = false;
                with_state(|state| {
                    state
                        .session
                        .tick(state.started.elapsed(), &mut state.input);

                    for event in state.session.take_events() {
                        match event {
                            GameEvent::ProblemPresented {
                                seq,
                                question,
                                status,
                            } => {
                                state.problem_seq = seq;
                                game_ui::show_problem(&question, &status)
                            }
                            GameEvent::CombatEnded => game_ui::hide_problem(),
                            GameEvent::VictoryNoticeShown => game_ui::show_victory(),
                            GameEvent::VictoryNoticeExpired => game_ui::hide_victory(),
                            GameEvent::GameOver => {
                                game_ui::show_game_over();
                                state.audio.pause();
                            }
                            GameEvent::Restart => restart = true,
                        }
                    }
                    if restart {
                        return;
                    }

                    match state.renderer.render_frame(&state.session) {
                        Ok(_) => state.renderer.request_redraw(),
                        Err(wgpu::SurfaceError::Lost) => {
                            let (w, h) = (state.renderer.width(), state.renderer.height());
                            state.renderer.resize(w, h);
                            state.renderer.request_redraw();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => {
                            log::error!("Render error: {:?}", e);
                            state.renderer.request_redraw();
                        }
                    }
                });
                if restart {
                    game_ui::reload_page();
                }
            }
            _ => {}
        }
    }
}

fn install_page_handlers() {
    game_ui::install_answer_handler(|raw| {
        with_state(|state| state.input.submit_answer(state.problem_seq, raw))
    });
    game_ui::on_first_click(game_ui::hide_instructions);
    game_ui::on_pointer_lock_change(|locked| {
        with_state(|state| state.input.set_cursor_grabbed(locked))
    });
}

pub fn run() {
    std::panic::set_hook(Box::new(|info| {
        web_sys::console::error_1(&info.to_string().into())
    }));
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&JsValue::from_str(&format!("Logger init failed: {e}")));
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => return fail_startup("Could not start the event loop", e),
    };
    #[allow(clippy::let_underscore_future)]
    let _ = event_loop.run_app(&mut App::default());
}
