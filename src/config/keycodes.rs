//! Virtual-key name and code lookup.
//!
//! Key names in the configuration file follow the AWT virtual-key naming
//! (`VK_CONTROL`, `VK_WINDOWS`, `VK_A`, ...) together with their numeric
//! codes. The table is declared once and indexed lazily on first use.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Prefix shared by every virtual-key constant name.
pub const VK_PREFIX: &str = "VK_";

/// Name reported for codes without a symbolic constant.
pub const UNDEFINED_NAME: &str = "VK_UNDEFINED";

/// A platform-neutral virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyCode(pub i32);

impl KeyCode {
    /// Placeholder for unused command slots and unresolved names.
    pub const UNDEFINED: KeyCode = KeyCode(0);

    pub const TAB: KeyCode = KeyCode(9);
    pub const SHIFT: KeyCode = KeyCode(16);
    pub const CONTROL: KeyCode = KeyCode(17);
    pub const ALT: KeyCode = KeyCode(18);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const WINDOWS: KeyCode = KeyCode(524);

    /// Returns `true` for the undefined sentinel.
    pub fn is_undefined(self) -> bool {
        self == Self::UNDEFINED
    }

    /// Returns the symbolic name of this code.
    pub fn name(self) -> &'static str {
        KeyCodeTable::global().name_for(self)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

/// A key name that does not match any virtual-key constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyError(pub String);

impl fmt::Display for UnknownKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown key name: '{}'", self.0)
    }
}

impl std::error::Error for UnknownKeyError {}

/// Declared virtual-key constants, in declaration order.
///
/// Aliases share a code; reverse lookup returns the first declared name.
const VIRTUAL_KEYS: &[(&str, i32)] = &[
    ("VK_ENTER", 10),
    ("VK_BACK_SPACE", 8),
    ("VK_TAB", 9),
    ("VK_CANCEL", 3),
    ("VK_CLEAR", 12),
    ("VK_SHIFT", 16),
    ("VK_CONTROL", 17),
    ("VK_ALT", 18),
    ("VK_PAUSE", 19),
    ("VK_CAPS_LOCK", 20),
    ("VK_ESCAPE", 27),
    ("VK_SPACE", 32),
    ("VK_PAGE_UP", 33),
    ("VK_PAGE_DOWN", 34),
    ("VK_END", 35),
    ("VK_HOME", 36),
    ("VK_LEFT", 37),
    ("VK_UP", 38),
    ("VK_RIGHT", 39),
    ("VK_DOWN", 40),
    ("VK_COMMA", 44),
    ("VK_MINUS", 45),
    ("VK_PERIOD", 46),
    ("VK_SLASH", 47),
    ("VK_0", 48),
    ("VK_1", 49),
    ("VK_2", 50),
    ("VK_3", 51),
    ("VK_4", 52),
    ("VK_5", 53),
    ("VK_6", 54),
    ("VK_7", 55),
    ("VK_8", 56),
    ("VK_9", 57),
    ("VK_SEMICOLON", 59),
    ("VK_EQUALS", 61),
    ("VK_A", 65),
    ("VK_B", 66),
    ("VK_C", 67),
    ("VK_D", 68),
    ("VK_E", 69),
    ("VK_F", 70),
    ("VK_G", 71),
    ("VK_H", 72),
    ("VK_I", 73),
    ("VK_J", 74),
    ("VK_K", 75),
    ("VK_L", 76),
    ("VK_M", 77),
    ("VK_N", 78),
    ("VK_O", 79),
    ("VK_P", 80),
    ("VK_Q", 81),
    ("VK_R", 82),
    ("VK_S", 83),
    ("VK_T", 84),
    ("VK_U", 85),
    ("VK_V", 86),
    ("VK_W", 87),
    ("VK_X", 88),
    ("VK_Y", 89),
    ("VK_Z", 90),
    ("VK_OPEN_BRACKET", 91),
    ("VK_BACK_SLASH", 92),
    ("VK_CLOSE_BRACKET", 93),
    ("VK_NUMPAD0", 96),
    ("VK_NUMPAD1", 97),
    ("VK_NUMPAD2", 98),
    ("VK_NUMPAD3", 99),
    ("VK_NUMPAD4", 100),
    ("VK_NUMPAD5", 101),
    ("VK_NUMPAD6", 102),
    ("VK_NUMPAD7", 103),
    ("VK_NUMPAD8", 104),
    ("VK_NUMPAD9", 105),
    ("VK_MULTIPLY", 106),
    ("VK_ADD", 107),
    ("VK_SEPARATER", 108),
    ("VK_SEPARATOR", 108),
    ("VK_SUBTRACT", 109),
    ("VK_DECIMAL", 110),
    ("VK_DIVIDE", 111),
    ("VK_DELETE", 127),
    ("VK_NUM_LOCK", 144),
    ("VK_SCROLL_LOCK", 145),
    ("VK_F1", 112),
    ("VK_F2", 113),
    ("VK_F3", 114),
    ("VK_F4", 115),
    ("VK_F5", 116),
    ("VK_F6", 117),
    ("VK_F7", 118),
    ("VK_F8", 119),
    ("VK_F9", 120),
    ("VK_F10", 121),
    ("VK_F11", 122),
    ("VK_F12", 123),
    ("VK_F13", 0xF000),
    ("VK_F14", 0xF001),
    ("VK_F15", 0xF002),
    ("VK_F16", 0xF003),
    ("VK_F17", 0xF004),
    ("VK_F18", 0xF005),
    ("VK_F19", 0xF006),
    ("VK_F20", 0xF007),
    ("VK_F21", 0xF008),
    ("VK_F22", 0xF009),
    ("VK_F23", 0xF00A),
    ("VK_F24", 0xF00B),
    ("VK_PRINTSCREEN", 154),
    ("VK_INSERT", 155),
    ("VK_HELP", 156),
    ("VK_META", 157),
    ("VK_BACK_QUOTE", 192),
    ("VK_QUOTE", 222),
    ("VK_KP_UP", 224),
    ("VK_KP_DOWN", 225),
    ("VK_KP_LEFT", 226),
    ("VK_KP_RIGHT", 227),
    ("VK_DEAD_GRAVE", 128),
    ("VK_DEAD_ACUTE", 129),
    ("VK_DEAD_CIRCUMFLEX", 130),
    ("VK_DEAD_TILDE", 131),
    ("VK_DEAD_MACRON", 132),
    ("VK_DEAD_BREVE", 133),
    ("VK_DEAD_ABOVEDOT", 134),
    ("VK_DEAD_DIAERESIS", 135),
    ("VK_DEAD_ABOVERING", 136),
    ("VK_DEAD_DOUBLEACUTE", 137),
    ("VK_DEAD_CARON", 138),
    ("VK_DEAD_CEDILLA", 139),
    ("VK_DEAD_OGONEK", 140),
    ("VK_DEAD_IOTA", 141),
    ("VK_DEAD_VOICED_SOUND", 142),
    ("VK_DEAD_SEMIVOICED_SOUND", 143),
    ("VK_AMPERSAND", 150),
    ("VK_ASTERISK", 151),
    ("VK_QUOTEDBL", 152),
    ("VK_LESS", 153),
    ("VK_GREATER", 160),
    ("VK_BRACELEFT", 161),
    ("VK_BRACERIGHT", 162),
    ("VK_AT", 512),
    ("VK_COLON", 513),
    ("VK_CIRCUMFLEX", 514),
    ("VK_DOLLAR", 515),
    ("VK_EURO_SIGN", 516),
    ("VK_EXCLAMATION_MARK", 517),
    ("VK_INVERTED_EXCLAMATION_MARK", 518),
    ("VK_LEFT_PARENTHESIS", 519),
    ("VK_NUMBER_SIGN", 520),
    ("VK_PLUS", 521),
    ("VK_RIGHT_PARENTHESIS", 522),
    ("VK_UNDERSCORE", 523),
    ("VK_WINDOWS", 524),
    ("VK_CONTEXT_MENU", 525),
    ("VK_FINAL", 24),
    ("VK_CONVERT", 28),
    ("VK_NONCONVERT", 29),
    ("VK_ACCEPT", 30),
    ("VK_MODECHANGE", 31),
    ("VK_KANA", 21),
    ("VK_KANJI", 25),
    ("VK_ALPHANUMERIC", 240),
    ("VK_KATAKANA", 241),
    ("VK_HIRAGANA", 242),
    ("VK_FULL_WIDTH", 243),
    ("VK_HALF_WIDTH", 244),
    ("VK_ROMAN_CHARACTERS", 245),
    ("VK_ALL_CANDIDATES", 256),
    ("VK_PREVIOUS_CANDIDATE", 257),
    ("VK_CODE_INPUT", 258),
    ("VK_JAPANESE_KATAKANA", 259),
    ("VK_JAPANESE_HIRAGANA", 260),
    ("VK_JAPANESE_ROMAN", 261),
    ("VK_KANA_LOCK", 262),
    ("VK_INPUT_METHOD_ON_OFF", 263),
    ("VK_CUT", 0xFFD1),
    ("VK_COPY", 0xFFCD),
    ("VK_PASTE", 0xFFCF),
    ("VK_UNDO", 0xFFCB),
    ("VK_AGAIN", 0xFFC9),
    ("VK_FIND", 0xFFD0),
    ("VK_PROPS", 0xFFCA),
    ("VK_STOP", 0xFFC8),
    ("VK_COMPOSE", 0xFF20),
    ("VK_ALT_GRAPH", 0xFF7E),
    ("VK_BEGIN", 0xFF58),
    ("VK_UNDEFINED", 0),
];

static TABLE: Lazy<KeyCodeTable> = Lazy::new(|| KeyCodeTable::from_entries(VIRTUAL_KEYS));

/// Bidirectional virtual-key lookup table.
#[derive(Debug)]
pub struct KeyCodeTable {
    entries: Vec<(&'static str, KeyCode)>,
    by_name: HashMap<&'static str, KeyCode>,
}

impl KeyCodeTable {
    /// Returns the process-wide table.
    pub fn global() -> &'static KeyCodeTable {
        &TABLE
    }

    fn from_entries(entries: &[(&'static str, i32)]) -> Self {
        let entries: Vec<(&'static str, KeyCode)> = entries
            .iter()
            .filter(|(name, _)| name.starts_with(VK_PREFIX))
            .map(|&(name, code)| (name, KeyCode(code)))
            .collect();

        let by_name = entries.iter().copied().collect();

        Self { entries, by_name }
    }

    /// Resolves a key name, ignoring case.
    pub fn code_for(&self, name: &str) -> Result<KeyCode, UnknownKeyError> {
        let normalized = name.trim().to_uppercase();
        self.by_name
            .get(normalized.as_str())
            .copied()
            .ok_or(UnknownKeyError(normalized))
    }

    /// Returns the first declared name for `code`, or [`UNDEFINED_NAME`].
    pub fn name_for(&self, code: KeyCode) -> &'static str {
        self.entries
            .iter()
            .find(|(_, candidate)| *candidate == code)
            .map(|(name, _)| *name)
            .unwrap_or(UNDEFINED_NAME)
    }

    /// Number of declared names (aliases included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_for_is_case_insensitive() {
        let table = KeyCodeTable::global();
        assert_eq!(table.code_for("VK_CONTROL"), Ok(KeyCode::CONTROL));
        assert_eq!(table.code_for("vk_control"), Ok(KeyCode::CONTROL));
        assert_eq!(table.code_for(" Vk_Tab "), Ok(KeyCode::TAB));
    }

    #[test]
    fn test_code_for_unknown_name() {
        let table = KeyCodeTable::global();
        let err = table.code_for("vk_nope").unwrap_err();
        assert_eq!(err, UnknownKeyError("VK_NOPE".to_string()));

        // Names must carry the prefix
        assert!(table.code_for("CONTROL").is_err());
    }

    #[test]
    fn test_name_for_known_and_unknown_codes() {
        let table = KeyCodeTable::global();
        assert_eq!(table.name_for(KeyCode::WINDOWS), "VK_WINDOWS");
        assert_eq!(table.name_for(KeyCode::D), "VK_D");
        assert_eq!(table.name_for(KeyCode(-42)), UNDEFINED_NAME);
        assert_eq!(table.name_for(KeyCode::UNDEFINED), UNDEFINED_NAME);
    }

    #[test]
    fn test_name_for_alias_returns_first_declared() {
        let table = KeyCodeTable::global();
        assert_eq!(table.name_for(KeyCode(108)), "VK_SEPARATER");
        assert_eq!(table.code_for("VK_SEPARATOR"), Ok(KeyCode(108)));
    }

    #[test]
    fn test_every_name_round_trips_to_a_code() {
        let table = KeyCodeTable::global();
        for (name, code) in VIRTUAL_KEYS {
            let resolved = table.code_for(name).unwrap();
            assert_eq!(resolved, KeyCode(*code));
            assert_eq!(table.code_for(table.name_for(resolved)).unwrap(), resolved);
        }
    }

    #[test]
    fn test_prefix_filter() {
        let table = KeyCodeTable::from_entries(&[("VK_A", 65), ("MOUSE_FIRST", 500)]);
        assert_eq!(table.len(), 1);
        assert!(table.code_for("MOUSE_FIRST").is_err());
        assert_eq!(table.name_for(KeyCode(500)), UNDEFINED_NAME);
    }

    #[test]
    fn test_symbol_ime_and_dead_keys_resolve() {
        let table = KeyCodeTable::global();
        assert_eq!(table.code_for("VK_PLUS"), Ok(KeyCode(521)));
        assert_eq!(table.code_for("VK_KANJI"), Ok(KeyCode(25)));
        assert_eq!(table.code_for("VK_AMPERSAND"), Ok(KeyCode(150)));
        assert_eq!(table.code_for("VK_CONVERT"), Ok(KeyCode(28)));
        assert_eq!(table.code_for("VK_DEAD_GRAVE"), Ok(KeyCode(128)));
        assert_eq!(table.code_for("vk_copy"), Ok(KeyCode(0xFFCD)));
        assert_eq!(table.name_for(KeyCode(0xFF58)), "VK_BEGIN");
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyCode::ALT.to_string(), "VK_ALT (18)");
    }
}
