use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    IncrementDisks,
    DecrementDisks,
    StartVisualization,
    Restart,
    OpenSettings,
}

impl GameAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::IncrementDisks => "More Disks",
            Self::DecrementDisks => "Fewer Disks",
            Self::StartVisualization => "Start Visualization",
            Self::Restart => "Restart",
            Self::OpenSettings => "Settings",
        }
    }

    pub fn all() -> &'static [GameAction] {
        use GameAction::*;
        &[IncrementDisks, DecrementDisks, StartVisualization, Restart, OpenSettings]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub shift: bool,
}

impl KeyBind {
    pub fn new(code: KeyCode) -> Self {
        Self { code, shift: false }
    }

    pub fn with_shift(code: KeyCode) -> Self {
        Self { code, shift: true }
    }

    pub fn display_name(&self) -> String {
        if self.shift {
            format!("Shift+{:?}", self.code)
        } else {
            format!("{:?}", self.code)
        }
    }
}

impl Serialize for KeyBind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_name())
    }
}

impl<'de> Deserialize<'de> for KeyBind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (shift, key_str) = match s.strip_prefix("Shift+") {
            Some(rest) => (true, rest),
            None => (false, s.as_str()),
        };
        let code = keycode_from_str(key_str).ok_or_else(|| {
            serde::de::Error::custom(format!("Unknown key code: {key_str}"))
        })?;
        Ok(KeyBind { code, shift })
    }
}

/// Inverse of the `Debug` name of the key codes we accept in bindings.
fn keycode_from_str(s: &str) -> Option<KeyCode> {
    const KEYS: &[KeyCode] = &[
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
        KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
        KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
        KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
        KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
        KeyCode::KeyZ,
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
        KeyCode::Escape, KeyCode::Tab, KeyCode::Space, KeyCode::Enter, KeyCode::Backspace,
        KeyCode::ArrowUp, KeyCode::ArrowDown, KeyCode::ArrowLeft, KeyCode::ArrowRight,
        KeyCode::Equal, KeyCode::Minus, KeyCode::NumpadAdd, KeyCode::NumpadSubtract,
        KeyCode::NumpadEnter, KeyCode::Backquote,
        KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
        KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
    ];
    KEYS.iter().copied().find(|code| format!("{code:?}") == s)
}

pub fn default_bindings() -> HashMap<GameAction, KeyBind> {
    use GameAction::*;
    HashMap::from([
        (IncrementDisks, KeyBind::new(KeyCode::ArrowUp)),
        (DecrementDisks, KeyBind::new(KeyCode::ArrowDown)),
        (StartVisualization, KeyBind::new(KeyCode::Enter)),
        (Restart, KeyBind::new(KeyCode::KeyR)),
        (OpenSettings, KeyBind::new(KeyCode::Escape)),
    ])
}

pub struct InputState {
    pub bindings: HashMap<GameAction, KeyBind>,
    reverse_map: HashMap<KeyCode, Vec<GameAction>>,
    just_pressed_actions: HashSet<GameAction>,
    pub shift_held: bool,
}

impl InputState {
    pub fn new(bindings: HashMap<GameAction, KeyBind>) -> Self {
        let reverse_map = build_reverse_map(&bindings);
        Self {
            bindings,
            reverse_map,
            just_pressed_actions: HashSet::new(),
            shift_held: false,
        }
    }

    #[cfg(test)]
    pub fn with_defaults() -> Self {
        Self::new(default_bindings())
    }

    /// Feed a raw key event. Only presses trigger actions; key repeat is
    /// expected to be filtered by the caller.
    pub fn on_key_event(&mut self, code: KeyCode, pressed: bool) {
        if code == KeyCode::ShiftLeft || code == KeyCode::ShiftRight {
            self.shift_held = pressed;
        }
        if !pressed {
            return;
        }

        if let Some(actions) = self.reverse_map.get(&code) {
            for &action in actions {
                let wants_shift = self.bindings.get(&action).map(|b| b.shift).unwrap_or(false);
                if wants_shift == self.shift_held {
                    self.just_pressed_actions.insert(action);
                }
            }
        }
    }

    pub fn just_pressed(&self, action: GameAction) -> bool {
        self.just_pressed_actions.contains(&action)
    }

    /// Actions pressed since the last `end_frame`, in `GameAction::all` order.
    pub fn pressed_actions(&self) -> Vec<GameAction> {
        GameAction::all()
            .iter()
            .copied()
            .filter(|a| self.just_pressed(*a))
            .collect()
    }

    pub fn end_frame(&mut self) {
        self.just_pressed_actions.clear();
    }

    pub fn rebind(&mut self, action: GameAction, bind: KeyBind) {
        self.bindings.insert(action, bind);
        self.reverse_map = build_reverse_map(&self.bindings);
    }
}

fn build_reverse_map(bindings: &HashMap<GameAction, KeyBind>) -> HashMap<KeyCode, Vec<GameAction>> {
    let mut map: HashMap<KeyCode, Vec<GameAction>> = HashMap::new();
    for (&action, bind) in bindings {
        map.entry(bind.code).or_default().push(action);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_actions() {
        let bindings = default_bindings();
        for action in GameAction::all() {
            assert!(bindings.contains_key(action), "{action:?} unbound");
        }
    }

    #[test]
    fn test_press_resolves_action() {
        let mut state = InputState::with_defaults();
        state.on_key_event(KeyCode::Enter, true);
        assert!(state.just_pressed(GameAction::StartVisualization));
        assert_eq!(state.pressed_actions(), vec![GameAction::StartVisualization]);

        state.end_frame();
        assert!(!state.just_pressed(GameAction::StartVisualization));
    }

    #[test]
    fn test_release_does_not_trigger() {
        let mut state = InputState::with_defaults();
        state.on_key_event(KeyCode::KeyR, false);
        assert!(state.pressed_actions().is_empty());
    }

    #[test]
    fn test_rebinding() {
        let mut state = InputState::with_defaults();
        state.rebind(GameAction::IncrementDisks, KeyBind::new(KeyCode::Equal));

        state.on_key_event(KeyCode::ArrowUp, true);
        assert!(!state.just_pressed(GameAction::IncrementDisks));

        state.on_key_event(KeyCode::Equal, true);
        assert!(state.just_pressed(GameAction::IncrementDisks));
    }

    #[test]
    fn test_shift_modifier() {
        let mut state = InputState::with_defaults();
        state.rebind(GameAction::Restart, KeyBind::with_shift(KeyCode::KeyR));
        state.on_key_event(KeyCode::KeyR, true);
        assert!(!state.just_pressed(GameAction::Restart));
        state.on_key_event(KeyCode::KeyR, false);

        state.on_key_event(KeyCode::ShiftLeft, true);
        state.on_key_event(KeyCode::KeyR, true);
        assert!(state.just_pressed(GameAction::Restart));
    }

    #[test]
    fn test_keybind_serialization() {
        // Wrap in a HashMap since TOML requires top-level tables
        let mut map = HashMap::new();
        map.insert("key", KeyBind::with_shift(KeyCode::ArrowUp));
        let s = toml::to_string(&map).unwrap();
        assert!(s.contains("Shift+ArrowUp"));

        let back: HashMap<String, KeyBind> = toml::from_str(&s).unwrap();
        assert_eq!(back["key"], KeyBind::with_shift(KeyCode::ArrowUp));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let parsed: Result<HashMap<String, KeyBind>, _> = toml::from_str("key = \"Hyper\"");
        assert!(parsed.is_err());
    }
}
