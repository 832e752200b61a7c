//! Keyboard mapping.
//!
//! SDL key events are translated into [`Key`] values; what a key does depends
//! on the screen and overlay and is decided by the app. Letter keys double as
//! shortcuts outside text entry.
//!
//! | Key | Action |
//! |-----|--------|
//! | Arrows | Move cursor / focus |
//! | Return | Confirm / activate |
//! | Space | Select / toggle |
//! | Backspace | Back (or delete a character while typing) |
//! | Escape | Cancel overlay / decline alert |
//! | O | Toggle online |
//! | V / T | Voice note / vitals overlay |
//! | C | Complete trip |
//! | S / H | Share summary / return home |

use embedded_graphics_simulator::sdl2::{Keycode, Mod};

/// A key the dashboard reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Backspace,
    Escape,
    Tab { reverse: bool },
    /// Printable character (already case-adjusted).
    Char(char),
}

/// Letter shortcuts, active whenever no text field has the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ToggleOnline,
    VoiceNote,
    Vitals,
    CompleteTrip,
    Share,
    ReturnHome,
}

impl Key {
    /// Shortcut bound to this key, if any.
    pub fn shortcut(self) -> Option<Shortcut> {
        let Self::Char(c) = self else {
            return None;
        };
        match c.to_ascii_lowercase() {
            'o' => Some(Shortcut::ToggleOnline),
            'v' => Some(Shortcut::VoiceNote),
            't' => Some(Shortcut::Vitals),
            'c' => Some(Shortcut::CompleteTrip),
            's' => Some(Shortcut::Share),
            'h' => Some(Shortcut::ReturnHome),
            _ => None,
        }
    }

    /// Keys that still act when held down while editing text.
    pub const fn repeats_in_text(self) -> bool { matches!(self, Self::Backspace | Self::Char(_) | Self::Space) }
}

const LETTERS: [(Keycode, char); 26] = [
    (Keycode::A, 'a'),
    (Keycode::B, 'b'),
    (Keycode::C, 'c'),
    (Keycode::D, 'd'),
    (Keycode::E, 'e'),
    (Keycode::F, 'f'),
    (Keycode::G, 'g'),
    (Keycode::H, 'h'),
    (Keycode::I, 'i'),
    (Keycode::J, 'j'),
    (Keycode::K, 'k'),
    (Keycode::L, 'l'),
    (Keycode::M, 'm'),
    (Keycode::N, 'n'),
    (Keycode::O, 'o'),
    (Keycode::P, 'p'),
    (Keycode::Q, 'q'),
    (Keycode::R, 'r'),
    (Keycode::S, 's'),
    (Keycode::T, 't'),
    (Keycode::U, 'u'),
    (Keycode::V, 'v'),
    (Keycode::W, 'w'),
    (Keycode::X, 'x'),
    (Keycode::Y, 'y'),
    (Keycode::Z, 'z'),
];

const DIGITS: [(Keycode, Keycode, char); 10] = [
    (Keycode::Num0, Keycode::Kp0, '0'),
    (Keycode::Num1, Keycode::Kp1, '1'),
    (Keycode::Num2, Keycode::Kp2, '2'),
    (Keycode::Num3, Keycode::Kp3, '3'),
    (Keycode::Num4, Keycode::Kp4, '4'),
    (Keycode::Num5, Keycode::Kp5, '5'),
    (Keycode::Num6, Keycode::Kp6, '6'),
    (Keycode::Num7, Keycode::Kp7, '7'),
    (Keycode::Num8, Keycode::Kp8, '8'),
    (Keycode::Num9, Keycode::Kp9, '9'),
];

/// Translate an SDL key press.
pub fn key_from_sdl(keycode: Keycode, keymod: Mod) -> Option<Key> {
    let shift = keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD);
    key_from_code(keycode, shift)
}

fn key_from_code(keycode: Keycode, shift: bool) -> Option<Key> {
    let key = match keycode {
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Space => Key::Space,
        Keycode::Backspace => Key::Backspace,
        Keycode::Escape => Key::Escape,
        Keycode::Tab => Key::Tab { reverse: shift },
        Keycode::Period | Keycode::KpPeriod => Key::Char('.'),
        Keycode::Comma => Key::Char(','),
        Keycode::Slash | Keycode::KpDivide => Key::Char('/'),
        Keycode::Minus | Keycode::KpMinus => Key::Char('-'),
        other => {
            if let Some(&(_, c)) = LETTERS.iter().find(|(code, _)| *code == other) {
                Key::Char(if shift { c.to_ascii_uppercase() } else { c })
            } else {
                let &(_, _, d) = DIGITS.iter().find(|(num, kp, _)| *num == other || *kp == other)?;
                Key::Char(d)
            }
        }
    };
    Some(key)
}
