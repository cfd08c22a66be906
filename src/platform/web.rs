//! Browser bindings
//!
//! `WebSession` is the handle JavaScript keeps for the lifetime of a game.
//! Keyboard listeners are registered when play starts and removed when the
//! session is dropped (`free()` on the JS side).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, KeyboardEvent};

use super::Session;
use super::input::IntentSource;
use crate::renderer::InstanceRaw;
use crate::settings::Settings;
use crate::sim::CameraTransform;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Orb Forage wasm module loaded");
}

/// `keydown`/`keyup`/`blur` listeners bound to one target
pub struct KeyboardListeners {
    target: EventTarget,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    blur: Closure<dyn FnMut(web_sys::Event)>,
}

impl KeyboardListeners {
    pub fn attach(target: EventTarget, input: Rc<RefCell<IntentSource>>) -> Result<Self, JsValue> {
        let keydown = {
            let input = Rc::clone(&input);
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if input.borrow_mut().key_down(&event.code()) {
                    event.prevent_default();
                }
            })
        };
        let keyup = {
            let input = Rc::clone(&input);
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if input.borrow_mut().key_up(&event.code()) {
                    event.prevent_default();
                }
            })
        };
        // Keys released while unfocused never send keyup
        let blur = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            input.borrow_mut().reset();
        });

        target.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        target.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        target.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        log::debug!("keyboard listeners attached");

        Ok(Self {
            target,
            keydown,
            keyup,
            blur,
        })
    }
}

impl Drop for KeyboardListeners {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        let _ = self
            .target
            .remove_event_listener_with_callback("keyup", self.keyup.as_ref().unchecked_ref());
        let _ = self
            .target
            .remove_event_listener_with_callback("blur", self.blur.as_ref().unchecked_ref());
        log::debug!("keyboard listeners removed");
    }
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    camera: CameraTransform,
    keyboard: Option<KeyboardListeners>,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let settings = Settings::load();
        let ambient_seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        let session = Session::new(&settings, ambient_seed);
        let camera = session
            .world()
            .rig()
            .transform(session.world().controller().position());
        WebSession {
            session,
            camera,
            keyboard: None,
        }
    }

    /// Leave the landing screen. Starts listening to the keyboard.
    pub fn play(&mut self) -> Result<(), JsValue> {
        self.session.play();
        if self.keyboard.is_none() {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let target: EventTarget = window.into();
            self.keyboard = Some(KeyboardListeners::attach(target, self.session.input())?);
        }
        Ok(())
    }

    pub fn begin(&mut self) {
        self.session.begin();
    }

    /// Advance by `dt_ms` milliseconds. Returns true on the frame every orb
    /// has been collected.
    pub fn frame(&mut self, dt_ms: f64) -> bool {
        let out = self.session.frame((dt_ms / 1000.0) as f32);
        self.camera = out.camera;
        out.events
            .iter()
            .any(|e| matches!(e, crate::sim::GameEvent::AllCollected))
    }

    /// `[px, py, pz, tx, ty, tz]`
    pub fn camera(&self) -> Vec<f32> {
        let (p, t) = (self.camera.position, self.camera.look_at);
        vec![p.x, p.y, p.z, t.x, t.y, t.z]
    }

    /// 1 per visible occluding scenery instance, 0 per hidden one
    pub fn visibility(&self) -> Vec<u8> {
        self.session
            .world()
            .visibility()
            .iter()
            .map(|&v| u8::from(v))
            .collect()
    }

    pub fn collected_count(&self) -> u32 {
        self.session.world().state.collected_count() as u32
    }

    pub fn total_count(&self) -> u32 {
        self.session.world().state.total_count() as u32
    }

    pub fn started(&self) -> bool {
        self.session.world().state.started()
    }

    pub fn intro_complete(&self) -> bool {
        self.session.world().state.intro_complete()
    }

    pub fn set_idle(&mut self, idle: bool) {
        self.session.idle_mode = idle;
        log::info!("Idle mode: {idle}");
    }

    /// Every scenery placement as 20 floats (column-major model, rgba)
    pub fn scenery_instances(&self) -> Vec<f32> {
        let instances: Vec<InstanceRaw> = self
            .session
            .world()
            .scenery
            .placements
            .iter()
            .map(InstanceRaw::from_placement)
            .collect();
        bytemuck::cast_slice(&instances).to_vec()
    }

    pub fn set_joystick(&mut self, x: f32, y: f32) {
        self.session.input().borrow_mut().apply_joystick(x, y);
    }

    pub fn release_joystick(&mut self) {
        self.session.input().borrow_mut().apply_joystick(0.0, 0.0);
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
