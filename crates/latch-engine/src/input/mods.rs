use super::code::Code;

bitflags::bitflags! {
    /// Canonical modifier bitmask carried on raw events.
    ///
    /// Platform adapters either produce this mask directly or describe their own
    /// bit layout through `KeyTable::modifier_bits`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModMask: u32 {
        const CONTROL = 1 << 0;
        const FUNCTION = 1 << 1;
        const SHIFT = 1 << 2;
        const COMMAND = 1 << 3;
        const ALT = 1 << 4;
    }
}

/// Canonical mask bit → modifier code.
pub const MODIFIER_CODES: [(u32, Code); 5] = [
    (ModMask::CONTROL.bits(), Code::Control),
    (ModMask::FUNCTION.bits(), Code::Function),
    (ModMask::SHIFT.bits(), Code::Shift),
    (ModMask::COMMAND.bits(), Code::Command),
    (ModMask::ALT.bits(), Code::Alt),
];
