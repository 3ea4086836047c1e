use std::collections::{HashMap, HashSet};

use winit::dpi::PhysicalPosition;
use winit::event::{
    ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase, WindowEvent,
};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{
    Code, EventSource, InputConfig, KeyTable, LocalSource, ModMask, RawEvent, RawKind,
};

/// Raw event source fed from winit `WindowEvent`s.
///
/// winit delivers window events on the thread running the event loop, which is
/// also where the runtime polls, so events are buffered without locking.
/// Modifier state and pointer position are tracked here because winit reports
/// them in separate events from the keys and buttons they accompany.
///
/// Left and right modifier keys share one canonical code, and every finger
/// is `Code::Touch`. The shared code is pressed by the first physical key or
/// contact to go down and released by the last one to come up.
#[derive(Debug)]
pub struct WinitSource {
    local: LocalSource,
    mods: ModMask,
    pointer: Option<(f32, f32)>,
    pixels_per_line: f32,
    scroll_carry: f32,

    // Physical keys currently down among those with a left/right twin.
    sides_down: HashSet<KeyCode>,
    // Active touch ids.
    touches: HashSet<u64>,
}

impl WinitSource {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            local: LocalSource::new(),
            mods: ModMask::empty(),
            pointer: None,
            pixels_per_line: config.pixels_per_line.max(1.0),
            scroll_carry: 0.0,
            sides_down: HashSet::new(),
            touches: HashSet::new(),
        }
    }

    /// Translates and buffers `event`. Events with no input meaning are ignored.
    pub fn push_window_event(&mut self, scale_factor: f64, event: &WindowEvent) {
        if let Some(ev) = self.translate(scale_factor, event) {
            self.local.push(ev);
        }
    }

    /// Translates a winit `WindowEvent` into a raw event.
    ///
    /// Returns `None` for events not represented by the input subsystem.
    pub fn translate(&mut self, scale_factor: f64, event: &WindowEvent) -> Option<RawEvent> {
        let raw = match event {
            WindowEvent::CloseRequested => RawEvent::new(RawKind::Closed),
            WindowEvent::Resized(_) => RawEvent::new(RawKind::Resized),
            WindowEvent::Moved(_) => RawEvent::new(RawKind::Moved),
            WindowEvent::Occluded(true) => RawEvent::new(RawKind::Iconified),
            WindowEvent::Occluded(false) => RawEvent::new(RawKind::Uniconified),
            WindowEvent::Focused(true) => RawEvent::new(RawKind::FocusGained),
            WindowEvent::Focused(false) => {
                self.mods = ModMask::empty();
                self.sides_down.clear();
                self.touches.clear();
                RawEvent::new(RawKind::FocusLost)
            }

            WindowEvent::ModifiersChanged(m) => {
                // winit 0.30: ModifiersChanged carries a wrapper with `.state()`.
                self.mods = map_modifiers(m.state());
                self.pointer_event(RawKind::ModifiersChanged)
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(to_logical_f32(scale_factor, *position));
                self.pointer_event(RawKind::MouseMoved)
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let kind = match state {
                    ElementState::Pressed => RawKind::MousePressed,
                    ElementState::Released => RawKind::MouseReleased,
                };
                self.pointer_event(kind).with_code(button_native(*button))
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => {
                        to_logical_f32(scale_factor, *p).1 / self.pixels_per_line
                    }
                };
                let scroll = self.take_lines(lines);
                if scroll == 0 {
                    return None;
                }
                self.pointer_event(RawKind::Scrolled).with_scroll(scroll)
            }

            WindowEvent::KeyboardInput { event, .. } => {
                // Repeats never change press state.
                if event.repeat {
                    return None;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    // NativeKeyCode carries no stable numeric in winit 0.30.
                    return None;
                };
                let kind = self.key_kind(code, event.state)?;
                self.pointer_event(kind).with_code(code as u32)
            }

            WindowEvent::Touch(touch) => {
                let kind = self.touch_kind(touch.id, touch.phase);
                let (x, y) = to_logical_f32(scale_factor, touch.location);
                self.pointer = Some((x, y));
                RawEvent::new(kind).with_mods(self.mods.bits()).at(x, y)
            }

            _ => return None,
        };

        Some(raw)
    }

    /// Key edge for a physical key transition, or `None` when the key's twin
    /// still holds the shared code down.
    fn key_kind(&mut self, key: KeyCode, state: ElementState) -> Option<RawKind> {
        let Some(twin) = twin_key(key) else {
            return Some(match state {
                ElementState::Pressed => RawKind::KeyPressed,
                ElementState::Released => RawKind::KeyReleased,
            });
        };

        let twin_down = self.sides_down.contains(&twin);
        match state {
            ElementState::Pressed => {
                self.sides_down.insert(key);
                (!twin_down).then_some(RawKind::KeyPressed)
            }
            ElementState::Released => {
                self.sides_down.remove(&key);
                (!twin_down).then_some(RawKind::KeyReleased)
            }
        }
    }

    // Only the first contact down and the last one up change press state;
    // anything in between just moves the pointer.
    fn touch_kind(&mut self, id: u64, phase: TouchPhase) -> RawKind {
        match phase {
            TouchPhase::Started => {
                let first = self.touches.is_empty();
                self.touches.insert(id);
                if first { RawKind::TouchBegan } else { RawKind::TouchMoved }
            }
            TouchPhase::Moved => RawKind::TouchMoved,
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touches.remove(&id) && self.touches.is_empty() {
                    RawKind::TouchEnded
                } else {
                    RawKind::TouchMoved
                }
            }
        }
    }

    fn pointer_event(&self, kind: RawKind) -> RawEvent {
        let (x, y) = self.pointer.unwrap_or((0.0, 0.0));
        RawEvent::new(kind).with_mods(self.mods.bits()).at(x, y)
    }

    // Whole lines are reported; the fraction carries into the next wheel event.
    fn take_lines(&mut self, lines: f32) -> i32 {
        self.scroll_carry += lines;
        let whole = self.scroll_carry.trunc();
        self.scroll_carry -= whole;
        whole as i32
    }
}

impl EventSource for WinitSource {
    fn drain(&mut self, out: &mut Vec<RawEvent>) {
        self.local.drain(out);
    }

    fn cursor(&self) -> Option<(f32, f32)> {
        self.pointer
    }
}

/// Key table for winit `KeyCode`s and the button numbering of [`button_native`].
#[derive(Debug, Clone)]
pub struct WinitKeyTable {
    keys: HashMap<u32, Code>,
}

impl WinitKeyTable {
    pub fn new() -> Self {
        let keys = KEY_PAIRS
            .iter()
            .map(|&(key, code)| (key as u32, code))
            .collect();
        Self { keys }
    }
}

impl Default for WinitKeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTable for WinitKeyTable {
    fn key(&self, native: u32) -> Option<Code> {
        self.keys.get(&native).copied()
    }

    fn button(&self, native: u32) -> Option<Code> {
        match native {
            0 => Some(Code::MouseLeft),
            1 => Some(Code::MouseRight),
            2 => Some(Code::MouseMiddle),
            3 => Some(Code::MouseBack),
            4 => Some(Code::MouseForward),
            _ => None,
        }
    }
}

fn twin_key(key: KeyCode) -> Option<KeyCode> {
    let twin = match key {
        KeyCode::ShiftLeft => KeyCode::ShiftRight,
        KeyCode::ShiftRight => KeyCode::ShiftLeft,
        KeyCode::ControlLeft => KeyCode::ControlRight,
        KeyCode::ControlRight => KeyCode::ControlLeft,
        KeyCode::AltLeft => KeyCode::AltRight,
        KeyCode::AltRight => KeyCode::AltLeft,
        KeyCode::SuperLeft => KeyCode::SuperRight,
        KeyCode::SuperRight => KeyCode::SuperLeft,
        _ => return None,
    };
    Some(twin)
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> ModMask {
    let mut mask = ModMask::empty();
    mask.set(ModMask::SHIFT, m.shift_key());
    mask.set(ModMask::CONTROL, m.control_key());
    mask.set(ModMask::ALT, m.alt_key());
    mask.set(ModMask::COMMAND, m.super_key());
    mask
}

/// Native button number used in raw mouse events.
pub fn button_native(b: WinitMouseButton) -> u32 {
    match b {
        WinitMouseButton::Left => 0,
        WinitMouseButton::Right => 1,
        WinitMouseButton::Middle => 2,
        WinitMouseButton::Back => 3,
        WinitMouseButton::Forward => 4,
        // Outside the table; dropped by the normalizer.
        WinitMouseButton::Other(v) => 0x100 + u32::from(v),
    }
}

const KEY_PAIRS: &[(KeyCode, Code)] = &[
    (KeyCode::KeyA, Code::A),
    (KeyCode::KeyB, Code::B),
    (KeyCode::KeyC, Code::C),
    (KeyCode::KeyD, Code::D),
    (KeyCode::KeyE, Code::E),
    (KeyCode::KeyF, Code::F),
    (KeyCode::KeyG, Code::G),
    (KeyCode::KeyH, Code::H),
    (KeyCode::KeyI, Code::I),
    (KeyCode::KeyJ, Code::J),
    (KeyCode::KeyK, Code::K),
    (KeyCode::KeyL, Code::L),
    (KeyCode::KeyM, Code::M),
    (KeyCode::KeyN, Code::N),
    (KeyCode::KeyO, Code::O),
    (KeyCode::KeyP, Code::P),
    (KeyCode::KeyQ, Code::Q),
    (KeyCode::KeyR, Code::R),
    (KeyCode::KeyS, Code::S),
    (KeyCode::KeyT, Code::T),
    (KeyCode::KeyU, Code::U),
    (KeyCode::KeyV, Code::V),
    (KeyCode::KeyW, Code::W),
    (KeyCode::KeyX, Code::X),
    (KeyCode::KeyY, Code::Y),
    (KeyCode::KeyZ, Code::Z),
    (KeyCode::Digit0, Code::Digit0),
    (KeyCode::Digit1, Code::Digit1),
    (KeyCode::Digit2, Code::Digit2),
    (KeyCode::Digit3, Code::Digit3),
    (KeyCode::Digit4, Code::Digit4),
    (KeyCode::Digit5, Code::Digit5),
    (KeyCode::Digit6, Code::Digit6),
    (KeyCode::Digit7, Code::Digit7),
    (KeyCode::Digit8, Code::Digit8),
    (KeyCode::Digit9, Code::Digit9),
    (KeyCode::F1, Code::F1),
    (KeyCode::F2, Code::F2),
    (KeyCode::F3, Code::F3),
    (KeyCode::F4, Code::F4),
    (KeyCode::F5, Code::F5),
    (KeyCode::F6, Code::F6),
    (KeyCode::F7, Code::F7),
    (KeyCode::F8, Code::F8),
    (KeyCode::F9, Code::F9),
    (KeyCode::F10, Code::F10),
    (KeyCode::F11, Code::F11),
    (KeyCode::F12, Code::F12),
    (KeyCode::F13, Code::F13),
    (KeyCode::F14, Code::F14),
    (KeyCode::F15, Code::F15),
    (KeyCode::F16, Code::F16),
    (KeyCode::F17, Code::F17),
    (KeyCode::F18, Code::F18),
    (KeyCode::F19, Code::F19),
    (KeyCode::F20, Code::F20),
    (KeyCode::NumpadDecimal, Code::KpDecimal),
    (KeyCode::NumpadMultiply, Code::KpMultiply),
    (KeyCode::NumpadAdd, Code::KpPlus),
    // Apple keypads put Clear where NumLock sits.
    (KeyCode::NumLock, Code::KpClear),
    (KeyCode::NumpadDivide, Code::KpDivide),
    (KeyCode::NumpadEnter, Code::KpEnter),
    (KeyCode::NumpadSubtract, Code::KpMinus),
    (KeyCode::NumpadEqual, Code::KpEquals),
    (KeyCode::Numpad0, Code::Kp0),
    (KeyCode::Numpad1, Code::Kp1),
    (KeyCode::Numpad2, Code::Kp2),
    (KeyCode::Numpad3, Code::Kp3),
    (KeyCode::Numpad4, Code::Kp4),
    (KeyCode::Numpad5, Code::Kp5),
    (KeyCode::Numpad6, Code::Kp6),
    (KeyCode::Numpad7, Code::Kp7),
    (KeyCode::Numpad8, Code::Kp8),
    (KeyCode::Numpad9, Code::Kp9),
    (KeyCode::Equal, Code::Equal),
    (KeyCode::Minus, Code::Minus),
    (KeyCode::BracketLeft, Code::LeftBracket),
    (KeyCode::BracketRight, Code::RightBracket),
    (KeyCode::Quote, Code::Quote),
    (KeyCode::Semicolon, Code::Semicolon),
    (KeyCode::Backslash, Code::Backslash),
    (KeyCode::Comma, Code::Comma),
    (KeyCode::Slash, Code::Slash),
    (KeyCode::Period, Code::Period),
    (KeyCode::Backquote, Code::Grave),
    (KeyCode::Enter, Code::Return),
    (KeyCode::Tab, Code::Tab),
    (KeyCode::Space, Code::Space),
    (KeyCode::Backspace, Code::Backspace),
    (KeyCode::Escape, Code::Escape),
    (KeyCode::Home, Code::Home),
    (KeyCode::PageUp, Code::PageUp),
    (KeyCode::Delete, Code::ForwardDelete),
    (KeyCode::End, Code::End),
    (KeyCode::PageDown, Code::PageDown),
    (KeyCode::ArrowLeft, Code::ArrowLeft),
    (KeyCode::ArrowRight, Code::ArrowRight),
    (KeyCode::ArrowDown, Code::ArrowDown),
    (KeyCode::ArrowUp, Code::ArrowUp),
    (KeyCode::Insert, Code::Insert),
    // Left and right variants share one code.
    (KeyCode::ShiftLeft, Code::Shift),
    (KeyCode::ShiftRight, Code::Shift),
    (KeyCode::ControlLeft, Code::Control),
    (KeyCode::ControlRight, Code::Control),
    (KeyCode::AltLeft, Code::Alt),
    (KeyCode::AltRight, Code::Alt),
    (KeyCode::SuperLeft, Code::Command),
    (KeyCode::SuperRight, Code::Command),
    (KeyCode::Fn, Code::Function),
];
