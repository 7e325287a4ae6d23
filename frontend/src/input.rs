use std::collections::HashMap;

use ember_core::core::machine::InputButton;
use sdl2::keyboard::Scancode;

/// Maps SDL scancodes to machine input IDs.
pub struct KeyMap {
    map: HashMap<Scancode, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a machine input ID.
    pub fn bind(&mut self, scancode: Scancode, button_id: u8) {
        self.map.insert(scancode, button_id);
    }

    /// Look up the machine input ID for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<u8> {
        self.map.get(&scancode).copied()
    }
}

/// Build a default key map for a machine's inputs by name.
///
/// Letter, digit and function keys bind to their own keys; the Dragon
/// punctuation that has no direct PC position gets close stand-ins.
/// The Break key sits on Escape (quit the emulator with the window
/// close button or F12+Shift instead), Reset on F12.
pub fn default_key_map(buttons: &[InputButton]) -> KeyMap {
    let mut km = KeyMap::new();

    for button in buttons {
        let scancode = match button.name {
            "A" => Some(Scancode::A),
            "B" => Some(Scancode::B),
            "C" => Some(Scancode::C),
            "D" => Some(Scancode::D),
            "E" => Some(Scancode::E),
            "F" => Some(Scancode::F),
            "G" => Some(Scancode::G),
            "H" => Some(Scancode::H),
            "I" => Some(Scancode::I),
            "J" => Some(Scancode::J),
            "K" => Some(Scancode::K),
            "L" => Some(Scancode::L),
            "M" => Some(Scancode::M),
            "N" => Some(Scancode::N),
            "O" => Some(Scancode::O),
            "P" => Some(Scancode::P),
            "Q" => Some(Scancode::Q),
            "R" => Some(Scancode::R),
            "S" => Some(Scancode::S),
            "T" => Some(Scancode::T),
            "U" => Some(Scancode::U),
            "V" => Some(Scancode::V),
            "W" => Some(Scancode::W),
            "X" => Some(Scancode::X),
            "Y" => Some(Scancode::Y),
            "Z" => Some(Scancode::Z),

            "0" => Some(Scancode::Num0),
            "1" => Some(Scancode::Num1),
            "2" => Some(Scancode::Num2),
            "3" => Some(Scancode::Num3),
            "4" => Some(Scancode::Num4),
            "5" => Some(Scancode::Num5),
            "6" => Some(Scancode::Num6),
            "7" => Some(Scancode::Num7),
            "8" => Some(Scancode::Num8),
            "9" => Some(Scancode::Num9),

            "-" => Some(Scancode::Minus),
            ":" => Some(Scancode::Apostrophe),
            ";" => Some(Scancode::Semicolon),
            "," => Some(Scancode::Comma),
            "." => Some(Scancode::Period),
            "/" => Some(Scancode::Slash),
            "@" => Some(Scancode::LeftBracket),

            "Enter" => Some(Scancode::Return),
            "Space" => Some(Scancode::Space),
            "Shift" => Some(Scancode::LShift),
            "Break" => Some(Scancode::Escape),
            "Clear" => Some(Scancode::Home),
            "Up" => Some(Scancode::Up),
            "Down" => Some(Scancode::Down),
            "Left" => Some(Scancode::Left),
            "Right" => Some(Scancode::Right),

            "F1" => Some(Scancode::F1),
            "F2" => Some(Scancode::F2),
            "F3" => Some(Scancode::F3),
            "F4" => Some(Scancode::F4),
            "F5" => Some(Scancode::F5),
            "F6" => Some(Scancode::F6),
            "F7" => Some(Scancode::F7),
            "F8" => Some(Scancode::F8),
            "F9" => Some(Scancode::F9),
            "F10" => Some(Scancode::F10),

            "Reset" => Some(Scancode::F12),

            _ => None,
        };

        if let Some(sc) = scancode {
            km.bind(sc, button.id);
        }
    }

    km
}
