//! Call-site operand lexing and class admission.

use std::fmt;

use crate::taxonomy::{OperandClass, RegClass, Register};

/// One operand as typed at a call site. Lexing is permissive: anything that
/// is not a recognizable register, immediate, or memory reference is kept
/// verbatim as `Unknown`, which matching treats as compatible with every
/// position (the user may still be typing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    /// `bits` is the minimal width that holds the value (8, 16, 32, or 64).
    Immediate { value: i64, bits: u32 },
    /// `bits` is 0 when the reference carries no width keyword.
    Memory { bits: u32 },
    Unknown(String),
}

/// Memory width keywords accepted in operand text.
const WIDTH_KEYWORDS: &[(&str, u32)] = &[
    ("byte", 8),
    ("word", 16),
    ("dword", 32),
    ("qword", 64),
    ("tword", 80),
    ("oword", 128),
    ("xmmword", 128),
    ("ymmword", 256),
    ("zmmword", 512),
    ("zword", 512),
];

impl Operand {
    pub fn parse(s: &str) -> Operand {
        let text = s.trim();
        if text.is_empty() {
            return Operand::Unknown(String::new());
        }
        if let Some(reg) = Register::parse(text) {
            return Operand::Register(reg);
        }
        if let Some(value) = parse_immediate(text) {
            return Operand::Immediate { value, bits: minimal_bits(value) };
        }
        let lower = text.to_ascii_lowercase();
        for &(keyword, bits) in WIDTH_KEYWORDS {
            if lower.starts_with(keyword) {
                return Operand::Memory { bits };
            }
        }
        if lower.contains('[') {
            return Operand::Memory { bits: 0 };
        }
        Operand::Unknown(text.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Operand::Unknown(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => write!(f, "{r}"),
            Operand::Immediate { value, .. } => write!(f, "{value}"),
            Operand::Memory { bits: 0 } => f.write_str("mem"),
            Operand::Memory { bits } => write!(f, "m{bits}"),
            Operand::Unknown(text) => f.write_str(text),
        }
    }
}

fn parse_immediate(text: &str) -> Option<i64> {
    let (neg, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = body.strip_suffix('h').or_else(|| body.strip_suffix('H')) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<i64>().ok()?
    };
    Some(if neg { -value } else { value })
}

/// Minimal unsigned width holding the value; negative values measure their
/// two's-complement magnitude.
fn minimal_bits(value: i64) -> u32 {
    let magnitude = value.unsigned_abs();
    if magnitude <= 0xFF {
        8
    } else if magnitude <= 0xFFFF {
        16
    } else if magnitude <= 0xFFFF_FFFF {
        32
    } else {
        64
    }
}

/// Whether an operand class admits a concrete operand.
pub fn class_accepts(class: OperandClass, operand: &Operand) -> bool {
    use OperandClass as Op;
    // incomplete input is never grounds for rejection
    if operand.is_unknown() {
        return true;
    }
    match class {
        Op::Unknown => true,
        Op::None => false,

        Op::Mem => matches!(operand, Operand::Memory { .. }),
        Op::M8 => mem_width(operand, 8),
        Op::M16 => mem_width(operand, 16),
        Op::M32 => mem_width(operand, 32),
        Op::M64 => mem_width(operand, 64),
        Op::M128 => mem_width(operand, 128),
        Op::M256 => mem_width(operand, 256),
        Op::M512 => mem_width(operand, 512),
        Op::M32Bcst => mem_width(operand, 32),
        Op::M64Bcst => mem_width(operand, 64),
        // gather/scatter indices are memory references at the call site
        Op::Vm32x | Op::Vm64x | Op::Vm32y | Op::Vm64y | Op::Vm32z | Op::Vm64z => {
            matches!(operand, Operand::Memory { .. })
        }

        Op::R8 => reg_class(operand, RegClass::Bit8),
        Op::R16 => reg_class(operand, RegClass::Bit16),
        Op::R32 => reg_class(operand, RegClass::Bit32),
        Op::R64 => reg_class(operand, RegClass::Bit64),
        Op::SegReg => reg_class(operand, RegClass::Segment),
        Op::MmxReg => reg_class(operand, RegClass::Mmx),
        Op::XmmReg => reg_class(operand, RegClass::Xmm),
        Op::YmmReg => reg_class(operand, RegClass::Ymm),
        Op::ZmmReg => reg_class(operand, RegClass::Zmm),
        Op::K => reg_class(operand, RegClass::Opmask),

        Op::RegAl => is_reg(operand, Register::AL),
        Op::RegAx => is_reg(operand, Register::AX),
        Op::RegEax => is_reg(operand, Register::EAX),
        Op::RegRax => is_reg(operand, Register::RAX),
        Op::RegCl => is_reg(operand, Register::CL),
        Op::RegCx => is_reg(operand, Register::CX),
        Op::RegEcx => is_reg(operand, Register::ECX),
        Op::RegRcx => is_reg(operand, Register::RCX),
        Op::RegDx => is_reg(operand, Register::DX),
        Op::RegEdx => is_reg(operand, Register::EDX),
        Op::RegXmm0 => is_reg(operand, Register::XMM0),

        Op::Zero => matches!(operand, Operand::Immediate { value: 0, .. }),
        Op::Unity => matches!(operand, Operand::Immediate { value: 1, .. }),
        Op::Imm => matches!(operand, Operand::Immediate { .. }),
        Op::Imm8 => imm_fits(operand, 8),
        Op::Imm16 => imm_fits(operand, 16),
        Op::Imm32 => imm_fits(operand, 32),
        Op::Imm64 => imm_fits(operand, 64),

        // pure decorations, never a standalone operand
        Op::Z | Op::Sae | Op::Er => false,
    }
}

fn mem_width(operand: &Operand, width: u32) -> bool {
    // width 0 means the reference carried no size keyword
    matches!(operand, Operand::Memory { bits } if *bits == width || *bits == 0)
}

fn reg_class(operand: &Operand, class: RegClass) -> bool {
    matches!(operand, Operand::Register(r) if r.class == class)
}

fn is_reg(operand: &Operand, reg: Register) -> bool {
    matches!(operand, Operand::Register(r) if *r == reg)
}

fn imm_fits(operand: &Operand, width: u32) -> bool {
    matches!(operand, Operand::Immediate { bits, .. } if *bits <= width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_registers_immediates_and_memory() {
        assert_eq!(
            Operand::parse("xmm3"),
            Operand::Register(Register { class: RegClass::Xmm, index: 3 })
        );
        assert_eq!(Operand::parse("0x1F"), Operand::Immediate { value: 31, bits: 8 });
        assert_eq!(Operand::parse("70000"), Operand::Immediate { value: 70000, bits: 32 });
        assert_eq!(Operand::parse("-1"), Operand::Immediate { value: -1, bits: 8 });
        assert_eq!(Operand::parse("dword ptr [rax]"), Operand::Memory { bits: 32 });
        assert_eq!(Operand::parse("[rsi + 8]"), Operand::Memory { bits: 0 });
        assert_eq!(Operand::parse("my_var"), Operand::Unknown("my_var".to_string()));
    }

    #[test]
    fn memory_classes_check_width() {
        let m128 = Operand::parse("xmmword ptr [rax]");
        assert!(class_accepts(OperandClass::M128, &m128));
        assert!(!class_accepts(OperandClass::M64, &m128));
        // unsized reference is admitted at any width
        let bare = Operand::parse("[rax]");
        assert!(class_accepts(OperandClass::M128, &bare));
        assert!(class_accepts(OperandClass::M64, &bare));
    }

    #[test]
    fn immediates_admit_widening_only() {
        let imm8 = Operand::parse("5");
        assert!(class_accepts(OperandClass::Imm8, &imm8));
        assert!(class_accepts(OperandClass::Imm32, &imm8));
        let imm32 = Operand::parse("0x12345678");
        assert!(!class_accepts(OperandClass::Imm8, &imm32));
        assert!(class_accepts(OperandClass::Imm32, &imm32));
        assert!(class_accepts(OperandClass::Zero, &Operand::parse("0")));
        assert!(!class_accepts(OperandClass::Zero, &Operand::parse("2")));
    }

    #[test]
    fn specific_register_classes() {
        let eax = Operand::parse("eax");
        assert!(class_accepts(OperandClass::R32, &eax));
        assert!(class_accepts(OperandClass::RegEax, &eax));
        assert!(!class_accepts(OperandClass::RegEcx, &eax));
        assert!(!class_accepts(OperandClass::R64, &eax));
        assert!(class_accepts(OperandClass::K, &Operand::parse("k4")));
    }

    #[test]
    fn unknown_operand_matches_everything() {
        let partial = Operand::parse("half_typed_na");
        for &class in OperandClass::ALL {
            assert!(class_accepts(class, &partial));
        }
    }
}
