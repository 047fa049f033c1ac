/// Keyboard and pointer input, reduced to what one tick needs.
///
/// Terminals differ in what they report: keyboard-enhancement capable ones
/// (kitty protocol) send proper `Press` / `Repeat` / `Release` events, classic
/// ones only send `Press` and lean on OS key-repeat.  `HeldKeys` stamps every
/// press or repeat with the frame it arrived on and treats a key as held until
/// it is released or goes quiet for `hold_window` frames.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

/// A key counts as "held" if it was seen within this many frames.  The OS
/// key-repeat rate is at least 15 Hz, so at 60 FPS eight frames are always
/// refreshed before they expire.
pub const HOLD_WINDOW: u64 = 8;

/// Controls sampled for one simulation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

#[derive(Clone, Debug)]
pub struct HeldKeys {
    key_frame: HashMap<KeyCode, u64>,
    hold_window: u64,
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new(HOLD_WINDOW)
    }
}

impl HeldKeys {
    pub fn new(hold_window: u64) -> Self {
        Self {
            key_frame: HashMap::new(),
            hold_window,
        }
    }

    /// Fold one key event into the held set.  Non-key events are ignored.
    pub fn record(&mut self, event: &Event, frame: u64) {
        if let Event::Key(KeyEvent { code, kind, .. }) = event {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.key_frame.insert(normalize(*code), frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&normalize(*code));
                }
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&normalize(code))
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    /// Arrows or WASD to move, Space to fire.
    pub fn tick_input(&self, frame: u64) -> TickInput {
        let any = |codes: &[KeyCode]| codes.iter().any(|&c| self.is_held(c, frame));
        TickInput {
            left: any(&[KeyCode::Left, KeyCode::Char('a')]),
            right: any(&[KeyCode::Right, KeyCode::Char('d')]),
            up: any(&[KeyCode::Up, KeyCode::Char('w')]),
            down: any(&[KeyCode::Down, KeyCode::Char('s')]),
            fire: any(&[KeyCode::Char(' ')]),
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// q, Esc or Ctrl-C.
pub fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

/// Mouse/trackpad press, or Enter for keyboard-only terminals.
pub fn is_start(event: &Event) -> bool {
    match event {
        Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), .. }) => true,
        Event::Key(KeyEvent { code: KeyCode::Enter, kind: KeyEventKind::Press, .. }) => true,
        _ => false,
    }
}
