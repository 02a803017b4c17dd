//! Key parsing and command lookup

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

/// Ordered mapping from command names to key strings.
///
/// Key strings use the `parse_key_string` syntax ("q", "esc", "ctrl+p").
/// Commands keep their registration order, which is also the order the help
/// bar lists them in.
#[derive(Debug, Clone, Default)]
pub struct Keybindings {
    bindings: Vec<(String, Vec<String>)>,
}

impl Keybindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `keys` to `command`, replacing any previous keys for it.
    pub fn bind<I, S>(&mut self, command: impl Into<String>, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = command.into();
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        match self.bindings.iter_mut().find(|(name, _)| *name == command) {
            Some((_, existing)) => *existing = keys,
            None => self.bindings.push((command, keys)),
        }
        self
    }

    /// Get the command bound to a key event
    pub fn command_for(&self, key: &KeyEvent) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, keys)| {
                keys.iter()
                    .filter_map(|k| parse_key_string(k))
                    .any(|parsed| keys_match(&parsed, key))
            })
            .map(|(command, _)| command.as_str())
    }

    /// First key string bound to a command
    pub fn first_key(&self, command: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(name, _)| name == command)
            .and_then(|(_, keys)| keys.first())
            .map(String::as_str)
    }

    /// Commands in registration order
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(name, _)| name.as_str())
    }
}

// Character keys compare case-insensitively; kind and state are ignored
fn keys_match(bound: &KeyEvent, pressed: &KeyEvent) -> bool {
    let codes_match = match (&bound.code, &pressed.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.to_lowercase().eq(b.to_lowercase()),
        _ => bound.code == pressed.code,
    };
    codes_match && bound.modifiers == pressed.modifiers
}

/// Parse a key string like "q", "esc", "ctrl+p", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // "+" on its own is a key, not a modifier separator
    let (modifier_part, key_part) = match key_str.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+'), "+"),
        Some((mods, key)) => (Some(mods), key),
        None => (None, key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_part.into_iter().flat_map(|m| m.split('+')) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Format a key string for display (e.g., "ctrl+p" -> "^P", "q" -> "q", "esc" -> "Esc")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.trim().to_string();
    };

    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }

    match key.code {
        KeyCode::BackTab => return "Shift+Tab".to_string(),
        KeyCode::Char(' ') => out.push_str("Space"),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            out.extend(c.to_uppercase())
        }
        KeyCode::Char(c) => out.push(c),
        KeyCode::Esc => out.push_str("Esc"),
        KeyCode::Enter => out.push_str("Enter"),
        KeyCode::Tab => out.push_str("Tab"),
        KeyCode::Backspace => out.push_str("Backspace"),
        KeyCode::Up => out.push_str("Up"),
        KeyCode::Down => out.push_str("Down"),
        KeyCode::Left => out.push_str("Left"),
        KeyCode::Right => out.push_str("Right"),
        KeyCode::F(n) => out.push_str(&format!("F{n}")),
        _ => out.push_str(key_str.trim()),
    }
    out
}
