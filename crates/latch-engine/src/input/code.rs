use std::fmt;
use std::ops::Range;

/// Disjoint partitions of the canonical code space.
///
/// Each range owns a block of `0x20` values starting at [`CodeRange::start`],
/// so a code's range can be read straight off its numeric value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CodeRange {
    Letter,
    Digit,
    Function,
    Keypad,
    Punctuation,
    Navigation,
    Modifier,
    Pointer,
}

impl CodeRange {
    const WIDTH: u16 = 0x20;

    pub const fn start(self) -> u16 {
        match self {
            CodeRange::Letter => 0x000,
            CodeRange::Digit => 0x020,
            CodeRange::Function => 0x040,
            CodeRange::Keypad => 0x060,
            CodeRange::Punctuation => 0x080,
            CodeRange::Navigation => 0x0A0,
            CodeRange::Modifier => 0x0C0,
            CodeRange::Pointer => 0x0E0,
        }
    }

    pub const fn span(self) -> Range<u16> {
        self.start()..self.start() + Self::WIDTH
    }
}

macro_rules! codes {
    ($( $range:ident { $( $name:ident = $value:literal => $label:literal, )* } )*) => {
        /// Canonical input code.
        ///
        /// One variant per physical key, mouse button, touch contact, or modifier.
        /// The numeric value (see [`Code::raw`]) is stable across platforms; platform
        /// adapters translate their native codes into these through a `KeyTable`.
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[repr(u16)]
        pub enum Code {
            $($( $name = $value, )*)*
        }

        impl Code {
            /// Every code, in ascending numeric order.
            pub const ALL: &'static [Code] = &[$($( Code::$name, )*)*];

            /// Short display label, e.g. `"A"`, `"KP."`, `"Lm"`, `"Sh"`.
            pub const fn label(self) -> &'static str {
                match self {
                    $($( Code::$name => $label, )*)*
                }
            }

            pub const fn range(self) -> CodeRange {
                match self {
                    $($( Code::$name => CodeRange::$range, )*)*
                }
            }
        }
    };
}

codes! {
    Letter {
        A = 0x000 => "A",
        B = 0x001 => "B",
        C = 0x002 => "C",
        D = 0x003 => "D",
        E = 0x004 => "E",
        F = 0x005 => "F",
        G = 0x006 => "G",
        H = 0x007 => "H",
        I = 0x008 => "I",
        J = 0x009 => "J",
        K = 0x00A => "K",
        L = 0x00B => "L",
        M = 0x00C => "M",
        N = 0x00D => "N",
        O = 0x00E => "O",
        P = 0x00F => "P",
        Q = 0x010 => "Q",
        R = 0x011 => "R",
        S = 0x012 => "S",
        T = 0x013 => "T",
        U = 0x014 => "U",
        V = 0x015 => "V",
        W = 0x016 => "W",
        X = 0x017 => "X",
        Y = 0x018 => "Y",
        Z = 0x019 => "Z",
    }
    Digit {
        Digit0 = 0x020 => "0",
        Digit1 = 0x021 => "1",
        Digit2 = 0x022 => "2",
        Digit3 = 0x023 => "3",
        Digit4 = 0x024 => "4",
        Digit5 = 0x025 => "5",
        Digit6 = 0x026 => "6",
        Digit7 = 0x027 => "7",
        Digit8 = 0x028 => "8",
        Digit9 = 0x029 => "9",
    }
    Function {
        F1 = 0x040 => "F1",
        F2 = 0x041 => "F2",
        F3 = 0x042 => "F3",
        F4 = 0x043 => "F4",
        F5 = 0x044 => "F5",
        F6 = 0x045 => "F6",
        F7 = 0x046 => "F7",
        F8 = 0x047 => "F8",
        F9 = 0x048 => "F9",
        F10 = 0x049 => "F10",
        F11 = 0x04A => "F11",
        F12 = 0x04B => "F12",
        F13 = 0x04C => "F13",
        F14 = 0x04D => "F14",
        F15 = 0x04E => "F15",
        F16 = 0x04F => "F16",
        F17 = 0x050 => "F17",
        F18 = 0x051 => "F18",
        F19 = 0x052 => "F19",
        F20 = 0x053 => "F20",
    }
    Keypad {
        KpDecimal = 0x060 => "KP.",
        KpMultiply = 0x061 => "KP*",
        KpPlus = 0x062 => "KP+",
        KpClear = 0x063 => "KPCl",
        KpDivide = 0x064 => "KP/",
        KpEnter = 0x065 => "KPEnt",
        KpMinus = 0x066 => "KP-",
        KpEquals = 0x067 => "KP=",
        Kp0 = 0x068 => "KP0",
        Kp1 = 0x069 => "KP1",
        Kp2 = 0x06A => "KP2",
        Kp3 = 0x06B => "KP3",
        Kp4 = 0x06C => "KP4",
        Kp5 = 0x06D => "KP5",
        Kp6 = 0x06E => "KP6",
        Kp7 = 0x06F => "KP7",
        Kp8 = 0x070 => "KP8",
        Kp9 = 0x071 => "KP9",
    }
    Punctuation {
        Equal = 0x080 => "=",
        Minus = 0x081 => "-",
        LeftBracket = 0x082 => "[",
        RightBracket = 0x083 => "]",
        Quote = 0x084 => "Qt",
        Semicolon = 0x085 => ";",
        Backslash = 0x086 => "Bs",
        Comma = 0x087 => ",",
        Slash = 0x088 => "Sl",
        Period = 0x089 => ".",
        Grave = 0x08A => "~",
        Return = 0x08B => "Ret",
        Tab = 0x08C => "Tab",
        Space = 0x08D => "Sp",
        Backspace = 0x08E => "Del",
    }
    Navigation {
        Escape = 0x0A0 => "Esc",
        Home = 0x0A1 => "Home",
        PageUp = 0x0A2 => "Pup",
        ForwardDelete = 0x0A3 => "FDel",
        End = 0x0A4 => "End",
        PageDown = 0x0A5 => "Pdn",
        ArrowLeft = 0x0A6 => "La",
        ArrowRight = 0x0A7 => "Ra",
        ArrowDown = 0x0A8 => "Da",
        ArrowUp = 0x0A9 => "Ua",
        Insert = 0x0AA => "Ins",
    }
    Modifier {
        Control = 0x0C0 => "Ctl",
        Function = 0x0C1 => "Fn",
        Shift = 0x0C2 => "Sh",
        Command = 0x0C3 => "Cmd",
        Alt = 0x0C4 => "Alt",
    }
    Pointer {
        MouseLeft = 0x0E0 => "Lm",
        MouseMiddle = 0x0E1 => "Mm",
        MouseRight = 0x0E2 => "Rm",
        MouseBack = 0x0E3 => "Bm",
        MouseForward = 0x0E4 => "Fm",
        Touch = 0x0E5 => "Tch",
    }
}

impl Code {
    /// Stable numeric value.
    pub const fn raw(self) -> u16 {
        self as u16
    }

    /// Inverse of [`Code::raw`]. Values outside the table yield `None`.
    pub fn from_raw(raw: u16) -> Option<Code> {
        Code::ALL
            .binary_search_by_key(&raw, |c| c.raw())
            .ok()
            .map(|i| Code::ALL[i])
    }

    pub fn is_modifier(self) -> bool {
        self.range() == CodeRange::Modifier
    }

    pub fn is_pointer(self) -> bool {
        self.range() == CodeRange::Pointer
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn all_is_sorted_and_unique() {
        for pair in Code::ALL.windows(2) {
            assert!(pair[0].raw() < pair[1].raw(), "{:?} !< {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn every_code_sits_inside_its_range() {
        for &code in Code::ALL {
            assert!(
                code.range().span().contains(&code.raw()),
                "{code:?} ({:#x}) outside {:?}",
                code.raw(),
                code.range()
            );
        }
    }

    #[test]
    fn ranges_do_not_overlap() {
        let ranges = [
            CodeRange::Letter,
            CodeRange::Digit,
            CodeRange::Function,
            CodeRange::Keypad,
            CodeRange::Punctuation,
            CodeRange::Navigation,
            CodeRange::Modifier,
            CodeRange::Pointer,
        ];
        for pair in ranges.windows(2) {
            assert!(pair[0].span().end <= pair[1].span().start);
        }
    }

    #[test]
    fn labels_are_unique() {
        let labels: HashSet<&str> = Code::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), Code::ALL.len());
    }

    #[test]
    fn from_raw_inverts_raw() {
        assert_eq!(Code::from_raw(Code::Shift.raw()), Some(Code::Shift));
        assert_eq!(Code::from_raw(Code::Kp9.raw()), Some(Code::Kp9));
        assert_eq!(Code::from_raw(0x01F), None);
        assert_eq!(Code::from_raw(u16::MAX), None);
    }

    #[test]
    fn classification_helpers() {
        assert!(Code::Alt.is_modifier());
        assert!(!Code::A.is_modifier());
        assert!(Code::Touch.is_pointer());
        assert!(Code::MouseLeft.is_pointer());
        assert_eq!(Code::Shift.to_string(), "Sh");
    }
}
