//! Register vocabularies: the guide's SIMD register classes and the x86
//! operand registers seen at call sites.

use std::fmt;

/// SIMD register class of an intrinsic-level value (`__m128`, `__mmask16`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorRegister {
    #[default]
    Unknown,
    M64,
    M128,
    M128d,
    M128i,
    M256,
    M256d,
    M256i,
    M512,
    M512d,
    M512i,
    Mask8,
    Mask16,
    Mask32,
    Mask64,
}

impl VectorRegister {
    pub const ALL: &'static [VectorRegister] = &[
        VectorRegister::Unknown,
        VectorRegister::M64,
        VectorRegister::M128,
        VectorRegister::M128d,
        VectorRegister::M128i,
        VectorRegister::M256,
        VectorRegister::M256d,
        VectorRegister::M256i,
        VectorRegister::M512,
        VectorRegister::M512d,
        VectorRegister::M512i,
        VectorRegister::Mask8,
        VectorRegister::Mask16,
        VectorRegister::Mask32,
        VectorRegister::Mask64,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VectorRegister::Unknown => "UNKNOWN",
            VectorRegister::M64 => "__m64",
            VectorRegister::M128 => "__m128",
            VectorRegister::M128d => "__m128d",
            VectorRegister::M128i => "__m128i",
            VectorRegister::M256 => "__m256",
            VectorRegister::M256d => "__m256d",
            VectorRegister::M256i => "__m256i",
            VectorRegister::M512 => "__m512",
            VectorRegister::M512d => "__m512d",
            VectorRegister::M512i => "__m512i",
            VectorRegister::Mask8 => "__mmask8",
            VectorRegister::Mask16 => "__mmask16",
            VectorRegister::Mask32 => "__mmask32",
            VectorRegister::Mask64 => "__mmask64",
        }
    }

    /// Case-insensitive parse with `Unknown` fallback.
    pub fn parse(s: &str) -> VectorRegister {
        match s.trim().to_ascii_uppercase().as_str() {
            "__M64" => VectorRegister::M64,
            "__M128" => VectorRegister::M128,
            "__M128D" => VectorRegister::M128d,
            "__M128I" => VectorRegister::M128i,
            "__M256" => VectorRegister::M256,
            "__M256D" => VectorRegister::M256d,
            "__M256I" => VectorRegister::M256i,
            "__M512" => VectorRegister::M512,
            "__M512D" => VectorRegister::M512d,
            "__M512I" => VectorRegister::M512i,
            "__MMASK8" => VectorRegister::Mask8,
            "__MMASK16" => VectorRegister::Mask16,
            "__MMASK32" => VectorRegister::Mask32,
            "__MMASK64" => VectorRegister::Mask64,
            _ => VectorRegister::Unknown,
        }
    }

    /// Width in bits; masks report their mask width, `Unknown` reports 0.
    pub fn bits(self) -> u32 {
        match self {
            VectorRegister::Unknown => 0,
            VectorRegister::M64 => 64,
            VectorRegister::M128 | VectorRegister::M128d | VectorRegister::M128i => 128,
            VectorRegister::M256 | VectorRegister::M256d | VectorRegister::M256i => 256,
            VectorRegister::M512 | VectorRegister::M512d | VectorRegister::M512i => 512,
            VectorRegister::Mask8 => 8,
            VectorRegister::Mask16 => 16,
            VectorRegister::Mask32 => 32,
            VectorRegister::Mask64 => 64,
        }
    }
}

impl fmt::Display for VectorRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Architectural class of an x86 register name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegClass {
    Bit8,
    Bit16,
    Bit32,
    Bit64,
    Mmx,
    Xmm,
    Ymm,
    Zmm,
    Opmask,
    Segment,
}

impl RegClass {
    /// Operand width in bits.
    pub fn bits(self) -> u32 {
        match self {
            RegClass::Bit8 => 8,
            RegClass::Bit16 => 16,
            RegClass::Bit32 => 32,
            RegClass::Bit64 => 64,
            RegClass::Mmx => 64,
            RegClass::Xmm => 128,
            RegClass::Ymm => 256,
            RegClass::Zmm => 512,
            RegClass::Opmask => 64,
            RegClass::Segment => 16,
        }
    }
}

/// One concrete x86 register, as lexed from call-site text.
///
/// General-purpose indices follow the hardware encoding order
/// (0=A, 1=C, 2=D, 3=B, 4=SP, 5=BP, 6=SI, 7=DI, then R8..R15); segment
/// indices follow ES=0, CS=1, SS=2, DS=3, FS=4, GS=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub class: RegClass,
    pub index: u8,
}

/// Name tables for the general-purpose families, indexed by encoding order.
const GP8: &[&str] = &[
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
    "r13b", "r14b", "r15b",
];
const GP16: &[&str] = &[
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w",
    "r14w", "r15w",
];
const GP32: &[&str] = &[
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d",
    "r13d", "r14d", "r15d",
];
const GP64: &[&str] = &[
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];
const SEG: &[&str] = &["es", "cs", "ss", "ds", "fs", "gs"];

impl Register {
    pub const AL: Register = Register { class: RegClass::Bit8, index: 0 };
    pub const CL: Register = Register { class: RegClass::Bit8, index: 1 };
    pub const AX: Register = Register { class: RegClass::Bit16, index: 0 };
    pub const CX: Register = Register { class: RegClass::Bit16, index: 1 };
    pub const DX: Register = Register { class: RegClass::Bit16, index: 2 };
    pub const EAX: Register = Register { class: RegClass::Bit32, index: 0 };
    pub const ECX: Register = Register { class: RegClass::Bit32, index: 1 };
    pub const EDX: Register = Register { class: RegClass::Bit32, index: 2 };
    pub const RAX: Register = Register { class: RegClass::Bit64, index: 0 };
    pub const RCX: Register = Register { class: RegClass::Bit64, index: 1 };
    pub const XMM0: Register = Register { class: RegClass::Xmm, index: 0 };

    /// Parse a register name; `None` if the text is not a register.
    pub fn parse(s: &str) -> Option<Register> {
        let name = s.trim().to_ascii_lowercase();
        let lookup = |table: &[&str], class: RegClass| {
            table
                .iter()
                .position(|n| *n == name)
                .map(|i| Register { class, index: i as u8 })
        };
        if let Some(r) = lookup(GP8, RegClass::Bit8) {
            return Some(r);
        }
        if let Some(r) = lookup(GP16, RegClass::Bit16) {
            return Some(r);
        }
        if let Some(r) = lookup(GP32, RegClass::Bit32) {
            return Some(r);
        }
        if let Some(r) = lookup(GP64, RegClass::Bit64) {
            return Some(r);
        }
        if let Some(r) = lookup(SEG, RegClass::Segment) {
            return Some(r);
        }
        let numbered = |prefix: &str, class: RegClass, max: u8| -> Option<Register> {
            let idx: u8 = name.strip_prefix(prefix)?.parse().ok()?;
            (idx < max).then_some(Register { class, index: idx })
        };
        numbered("xmm", RegClass::Xmm, 32)
            .or_else(|| numbered("ymm", RegClass::Ymm, 32))
            .or_else(|| numbered("zmm", RegClass::Zmm, 32))
            .or_else(|| numbered("mm", RegClass::Mmx, 8))
            .or_else(|| numbered("k", RegClass::Opmask, 8))
    }

    pub fn bits(self) -> u32 {
        self.class.bits()
    }

    pub fn name(self) -> String {
        let i = self.index as usize;
        match self.class {
            RegClass::Bit8 => GP8[i].to_string(),
            RegClass::Bit16 => GP16[i].to_string(),
            RegClass::Bit32 => GP32[i].to_string(),
            RegClass::Bit64 => GP64[i].to_string(),
            RegClass::Segment => SEG[i].to_string(),
            RegClass::Mmx => format!("mm{i}"),
            RegClass::Xmm => format!("xmm{i}"),
            RegClass::Ymm => format!("ymm{i}"),
            RegClass::Zmm => format!("zmm{i}"),
            RegClass::Opmask => format!("k{i}"),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
