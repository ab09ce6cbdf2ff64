use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Actions a global shortcut can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CaptureToStack,
    PasteFromStack,
    DeleteFromStack,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::CaptureToStack,
        Action::PasteFromStack,
        Action::DeleteFromStack,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Action::CaptureToStack => "Copy the selection onto the stack",
            Action::PasteFromStack => "Choose an item to paste",
            Action::DeleteFromStack => "Choose an item to delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::CaptureToStack => "capture_to_stack",
            Action::PasteFromStack => "paste_from_stack",
            Action::DeleteFromStack => "delete_from_stack",
        };
        f.pad(s)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "capture_to_stack" => Ok(Action::CaptureToStack),
            "paste_from_stack" => Ok(Action::PasteFromStack),
            "delete_from_stack" => Ok(Action::DeleteFromStack),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// A modifier chord such as `cmd+shift+c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.modifiers.contains(KeyModifiers::SUPER) {
            parts.push("cmd".to_string());
        }
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("shift".to_string());
        }

        let key_str = match self.code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Up => "up".to_string(),
            KeyCode::Down => "down".to_string(),
            KeyCode::Left => "left".to_string(),
            KeyCode::Right => "right".to_string(),
            KeyCode::F(n) => format!("f{}", n),
            _ => format!("{:?}", self.code).to_lowercase(),
        };
        parts.push(key_str);

        write!(f, "{}", parts.join("+"))
    }
}

/// Parse a chord: "cmd+shift+c", "ctrl+alt+v", "cmd+shift+f5".
impl FromStr for KeyChord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty shortcut".to_string());
        }

        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_part, modifier_parts) = parts
            .split_last()
            .ok_or_else(|| format!("Invalid shortcut: {}", s))?;

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_parts {
            match part.to_lowercase().as_str() {
                "cmd" | "command" | "super" | "win" => modifiers |= KeyModifiers::SUPER,
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "opt" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }

        if modifiers.is_empty() {
            return Err(format!("Shortcut needs at least one modifier: {}", s));
        }

        let code = parse_key_code(key_part)?;
        Ok(KeyChord::new(code, modifiers))
    }
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let s_lower = s.to_lowercase();

    match s_lower.as_str() {
        "" => Err("Missing key".to_string()),
        "space" => Ok(KeyCode::Char(' ')),
        "tab" => Ok(KeyCode::Tab),
        "enter" | "return" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        s if s.starts_with('f') && s.len() > 1 => {
            let n: u8 = s[1..].parse().map_err(|_| format!("Invalid F key: {}", s))?;
            Ok(KeyCode::F(n))
        }
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                _ => Err(format!("Unknown key: {}", s)),
            }
        }
    }
}

/// Shortcut strings as written in `[shortcuts]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutsConfig {
    #[serde(default = "default_capture_to_stack")]
    pub capture_to_stack: String,

    #[serde(default = "default_paste_from_stack")]
    pub paste_from_stack: String,

    #[serde(default = "default_delete_from_stack")]
    pub delete_from_stack: String,
}

fn default_capture_to_stack() -> String {
    "cmd+shift+c".to_string()
}

fn default_paste_from_stack() -> String {
    "cmd+shift+v".to_string()
}

fn default_delete_from_stack() -> String {
    "cmd+shift+d".to_string()
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        Self {
            capture_to_stack: default_capture_to_stack(),
            paste_from_stack: default_paste_from_stack(),
            delete_from_stack: default_delete_from_stack(),
        }
    }
}

impl ShortcutsConfig {
    pub fn get(&self, action: Action) -> &str {
        match action {
            Action::CaptureToStack => &self.capture_to_stack,
            Action::PasteFromStack => &self.paste_from_stack,
            Action::DeleteFromStack => &self.delete_from_stack,
        }
    }

    fn default_for(action: Action) -> String {
        match action {
            Action::CaptureToStack => default_capture_to_stack(),
            Action::PasteFromStack => default_paste_from_stack(),
            Action::DeleteFromStack => default_delete_from_stack(),
        }
    }
}

/// Resolved chords for every action.
#[derive(Debug, Clone)]
pub struct ShortcutMap {
    chords: HashMap<Action, KeyChord>,
}

impl ShortcutMap {
    /// Invalid or conflicting user chords fall back to the defaults.
    pub fn from_config(config: &ShortcutsConfig) -> Self {
        let mut chords = HashMap::new();
        let mut bound: HashMap<KeyChord, Action> = HashMap::new();

        for action in Action::ALL {
            let raw = config.get(action);
            let chord = match raw.parse::<KeyChord>() {
                Ok(chord) => chord,
                Err(e) => {
                    warn!("Invalid shortcut for {action}: {e}, using default");
                    default_chord(action)
                }
            };

            let chord = match bound.get(&chord) {
                Some(other) => {
                    warn!("Shortcut {chord} for {action} is already bound to {other}, using default");
                    default_chord(action)
                }
                None => chord,
            };

            chords.insert(action, chord);
            bound.insert(chord, action);
        }

        Self { chords }
    }

    pub fn chord_for(&self, action: Action) -> Option<KeyChord> {
        self.chords.get(&action).copied()
    }
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self::from_config(&ShortcutsConfig::default())
    }
}

fn default_chord(action: Action) -> KeyChord {
    // Built-in strings always parse.
    ShortcutsConfig::default_for(action)
        .parse()
        .unwrap_or(KeyChord::new(KeyCode::Null, KeyModifiers::SUPER))
}
