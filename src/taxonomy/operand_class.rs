//! Operand-class vocabulary used by signature matching.
//!
//! One textual operand spec from an instruction signature (e.g. `XMM/M128`,
//! `R/M32{ER}`) expands to the set of classes an operand at that position may
//! belong to. The expansion is a flat table so that tolerating unknown specs
//! stays trivially verifiable.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Category of a single operand position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperandClass {
    /// Unrecognized spec token. Accepts any operand, so new guide vocabulary
    /// degrades to "no filtering" instead of rejecting everything.
    #[default]
    Unknown,
    /// Explicit empty position.
    None,

    // memory operands
    Mem,
    M8,
    M16,
    M32,
    M64,
    M128,
    M256,
    M512,

    // general-purpose registers
    R8,
    R16,
    R32,
    R64,

    // specific registers
    RegAl,
    RegAx,
    RegEax,
    RegRax,
    RegCl,
    RegCx,
    RegEcx,
    RegRcx,
    RegDx,
    RegEdx,
    RegXmm0,
    SegReg,

    // immediates
    /// The immediate 0.
    Zero,
    /// The immediate 1.
    Unity,
    Imm,
    Imm8,
    Imm16,
    Imm32,
    Imm64,

    // SIMD registers and AVX512 decorations
    MmxReg,
    XmmReg,
    YmmReg,
    ZmmReg,
    /// Opmask register.
    K,
    /// Zero-mask decoration `{z}`.
    Z,
    /// Suppress-all-exceptions decoration `{sae}`.
    Sae,
    /// Embedded-rounding decoration `{er}`.
    Er,
    /// Vector broadcast from a 32-bit memory location.
    M32Bcst,
    /// Vector broadcast from a 64-bit memory location.
    M64Bcst,

    // gather/scatter vector memory operands [gpr + simd*scale + offset]
    Vm32x,
    Vm64x,
    Vm32y,
    Vm64y,
    Vm32z,
    Vm64z,
}

impl OperandClass {
    pub const ALL: &'static [OperandClass] = &[
        OperandClass::Unknown,
        OperandClass::None,
        OperandClass::Mem,
        OperandClass::M8,
        OperandClass::M16,
        OperandClass::M32,
        OperandClass::M64,
        OperandClass::M128,
        OperandClass::M256,
        OperandClass::M512,
        OperandClass::R8,
        OperandClass::R16,
        OperandClass::R32,
        OperandClass::R64,
        OperandClass::RegAl,
        OperandClass::RegAx,
        OperandClass::RegEax,
        OperandClass::RegRax,
        OperandClass::RegCl,
        OperandClass::RegCx,
        OperandClass::RegEcx,
        OperandClass::RegRcx,
        OperandClass::RegDx,
        OperandClass::RegEdx,
        OperandClass::RegXmm0,
        OperandClass::SegReg,
        OperandClass::Zero,
        OperandClass::Unity,
        OperandClass::Imm,
        OperandClass::Imm8,
        OperandClass::Imm16,
        OperandClass::Imm32,
        OperandClass::Imm64,
        OperandClass::MmxReg,
        OperandClass::XmmReg,
        OperandClass::YmmReg,
        OperandClass::ZmmReg,
        OperandClass::K,
        OperandClass::Z,
        OperandClass::Sae,
        OperandClass::Er,
        OperandClass::M32Bcst,
        OperandClass::M64Bcst,
        OperandClass::Vm32x,
        OperandClass::Vm64x,
        OperandClass::Vm32y,
        OperandClass::Vm64y,
        OperandClass::Vm32z,
        OperandClass::Vm64z,
    ];

    /// Canonical spelling of a single class.
    pub fn as_str(self) -> &'static str {
        match self {
            OperandClass::Unknown => "UNKNOWN",
            OperandClass::None => "NONE",
            OperandClass::Mem => "MEM",
            OperandClass::M8 => "M8",
            OperandClass::M16 => "M16",
            OperandClass::M32 => "M32",
            OperandClass::M64 => "M64",
            OperandClass::M128 => "M128",
            OperandClass::M256 => "M256",
            OperandClass::M512 => "M512",
            OperandClass::R8 => "R8",
            OperandClass::R16 => "R16",
            OperandClass::R32 => "R32",
            OperandClass::R64 => "R64",
            OperandClass::RegAl => "AL",
            OperandClass::RegAx => "AX",
            OperandClass::RegEax => "EAX",
            OperandClass::RegRax => "RAX",
            OperandClass::RegCl => "CL",
            OperandClass::RegCx => "CX",
            OperandClass::RegEcx => "ECX",
            OperandClass::RegRcx => "RCX",
            OperandClass::RegDx => "DX",
            OperandClass::RegEdx => "EDX",
            OperandClass::RegXmm0 => "XMM0",
            OperandClass::SegReg => "SREG",
            OperandClass::Zero => "0",
            OperandClass::Unity => "1",
            OperandClass::Imm => "IMM",
            OperandClass::Imm8 => "IMM8",
            OperandClass::Imm16 => "IMM16",
            OperandClass::Imm32 => "IMM32",
            OperandClass::Imm64 => "IMM64",
            OperandClass::MmxReg => "MM",
            OperandClass::XmmReg => "XMM",
            OperandClass::YmmReg => "YMM",
            OperandClass::ZmmReg => "ZMM",
            OperandClass::K => "K",
            OperandClass::Z => "Z",
            OperandClass::Sae => "SAE",
            OperandClass::Er => "ER",
            OperandClass::M32Bcst => "M32BCST",
            OperandClass::M64Bcst => "M64BCST",
            OperandClass::Vm32x => "VM32X",
            OperandClass::Vm64x => "VM64X",
            OperandClass::Vm32y => "VM32Y",
            OperandClass::Vm64y => "VM64Y",
            OperandClass::Vm32z => "VM32Z",
            OperandClass::Vm64z => "VM64Z",
        }
    }

    /// Brief operand description for signature-help display.
    pub fn doc(self) -> &'static str {
        match self {
            OperandClass::Unknown => "operand",
            OperandClass::None => "no operand",
            OperandClass::Mem => "memory operand",
            OperandClass::M8 => "8-bit memory operand",
            OperandClass::M16 => "16-bit memory operand",
            OperandClass::M32 => "32-bit memory operand",
            OperandClass::M64 => "64-bit memory operand",
            OperandClass::M128 => "128-bit memory operand",
            OperandClass::M256 => "256-bit memory operand",
            OperandClass::M512 => "512-bit memory operand",
            OperandClass::R8 => "8-bit register",
            OperandClass::R16 => "16-bit register",
            OperandClass::R32 => "32-bit register",
            OperandClass::R64 => "64-bit register",
            OperandClass::RegAl => "AL register",
            OperandClass::RegAx => "AX register",
            OperandClass::RegEax => "EAX register",
            OperandClass::RegRax => "RAX register",
            OperandClass::RegCl => "CL register",
            OperandClass::RegCx => "CX register",
            OperandClass::RegEcx => "ECX register",
            OperandClass::RegRcx => "RCX register",
            OperandClass::RegDx => "DX register",
            OperandClass::RegEdx => "EDX register",
            OperandClass::RegXmm0 => "XMM0 register",
            OperandClass::SegReg => "segment register",
            OperandClass::Zero => "immediate value 0",
            OperandClass::Unity => "immediate value 1",
            OperandClass::Imm => "immediate constant",
            OperandClass::Imm8 => "8-bit immediate constant",
            OperandClass::Imm16 => "16-bit immediate constant",
            OperandClass::Imm32 => "32-bit immediate constant",
            OperandClass::Imm64 => "64-bit immediate constant",
            OperandClass::MmxReg => "mmx register",
            OperandClass::XmmReg => "xmm register",
            OperandClass::YmmReg => "ymm register",
            OperandClass::ZmmReg => "zmm register",
            OperandClass::K => "mask register",
            OperandClass::Z => "optional zero mask {z}",
            OperandClass::Sae => "optional suppress-all-exceptions {sae}",
            OperandClass::Er => "optional rounding mode {rn-sae}/{rd-sae}/{ru-sae}/{rz-sae}",
            OperandClass::M32Bcst => "vector broadcast from a 32-bit memory location",
            OperandClass::M64Bcst => "vector broadcast from a 64-bit memory location",
            OperandClass::Vm32x => "vector memory operand [gpr+xmm*scale], 32-bit elements",
            OperandClass::Vm64x => "vector memory operand [gpr+xmm*scale], 64-bit elements",
            OperandClass::Vm32y => "vector memory operand [gpr+ymm*scale], 32-bit elements",
            OperandClass::Vm64y => "vector memory operand [gpr+ymm*scale], 64-bit elements",
            OperandClass::Vm32z => "vector memory operand [gpr+zmm*scale], 32-bit elements",
            OperandClass::Vm64z => "vector memory operand [gpr+zmm*scale], 64-bit elements",
        }
    }

    /// Parse a single canonical class token (the inverse of [`as_str`]).
    ///
    /// [`as_str`]: OperandClass::as_str
    pub fn parse(s: &str) -> OperandClass {
        let norm = s.trim().to_ascii_uppercase();
        for &class in Self::ALL {
            if class.as_str() == norm {
                return class;
            }
        }
        OperandClass::Unknown
    }
}

impl fmt::Display for OperandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expansion table for composite operand specs. Keys are normalized to
/// uppercase. Anything absent from this table that is also not a single
/// canonical class token falls back to `[Unknown]`.
static SPEC_TABLE: Lazy<HashMap<&'static str, &'static [OperandClass]>> = Lazy::new(|| {
    use OperandClass as Op;
    const ENTRIES: &[(&str, &[Op])] = &[
        ("REG", &[Op::R32]),
        ("SREG", &[Op::SegReg]),
        ("REG_SREG", &[Op::SegReg]),
        // register or memory
        ("R/M8", &[Op::R8, Op::M8]),
        ("R/M16", &[Op::R16, Op::M16]),
        ("R/M32", &[Op::R32, Op::M32]),
        ("R/M64", &[Op::R64, Op::M64]),
        ("R/M32{ER}", &[Op::R32, Op::M32, Op::Er]),
        ("R/M64{ER}", &[Op::R64, Op::M64, Op::Er]),
        ("REG/M8", &[Op::R8, Op::M8]),
        ("REG/M16", &[Op::R16, Op::M16]),
        ("REG/M32", &[Op::R32, Op::M32]),
        ("R16/M16", &[Op::R16, Op::M16]),
        ("R32/M16", &[Op::R32, Op::M16]),
        ("R64/M16", &[Op::R64, Op::M16]),
        ("R32/M32", &[Op::R32, Op::M32]),
        ("R64/M64", &[Op::R64, Op::M64]),
        ("R32/M8", &[Op::R32, Op::M8]),
        // decorated memory
        ("M32{K}", &[Op::M32, Op::K]),
        ("M64{K}", &[Op::M64, Op::K]),
        // immediates
        ("MOFFS8", &[Op::Imm8]),
        ("MOFFS16", &[Op::Imm16]),
        ("MOFFS32", &[Op::Imm32]),
        ("MOFFS64", &[Op::Imm64]),
        // mmx
        ("MM/M32", &[Op::MmxReg, Op::M32]),
        ("MM/M64", &[Op::MmxReg, Op::M64]),
        ("MM/MEM", &[Op::MmxReg, Op::M64]),
        // masks
        ("K{K}", &[Op::K]),
        ("K/M8", &[Op::K, Op::M8]),
        ("K/M16", &[Op::K, Op::M16]),
        ("K/M32", &[Op::K, Op::M32]),
        ("K/M64", &[Op::K, Op::M64]),
        // gather/scatter
        ("VM32X{K}", &[Op::Vm32x, Op::K]),
        ("VM64X{K}", &[Op::Vm64x, Op::K]),
        ("VM32Y{K}", &[Op::Vm32y, Op::K]),
        ("VM64Y{K}", &[Op::Vm64y, Op::K]),
        ("VM32Z{K}", &[Op::Vm32z, Op::K]),
        ("VM64Z{K}", &[Op::Vm64z, Op::K]),
        // xmm
        ("XMM_ZERO", &[Op::RegXmm0]),
        ("XMM{K}", &[Op::XmmReg, Op::K]),
        ("XMM{K}{Z}", &[Op::XmmReg, Op::K, Op::Z]),
        ("XMM/M8", &[Op::XmmReg, Op::M8]),
        ("XMM/M16", &[Op::XmmReg, Op::M16]),
        ("XMM/M16{K}{Z}", &[Op::XmmReg, Op::M16, Op::K, Op::Z]),
        ("XMM/M32", &[Op::XmmReg, Op::M32]),
        ("XMM/M32{K}{Z}", &[Op::XmmReg, Op::M32, Op::K, Op::Z]),
        ("XMM/M32{ER}", &[Op::XmmReg, Op::M32, Op::Er]),
        ("XMM/M32{SAE}", &[Op::XmmReg, Op::M32, Op::Sae]),
        ("XMM/M64", &[Op::XmmReg, Op::M64]),
        ("XMM/M64{K}{Z}", &[Op::XmmReg, Op::M64, Op::K, Op::Z]),
        ("XMM/M64{ER}", &[Op::XmmReg, Op::M64, Op::Er]),
        ("XMM/M64{SAE}", &[Op::XmmReg, Op::M64, Op::Sae]),
        ("XMM/M64/M32BCST", &[Op::XmmReg, Op::M64, Op::M32Bcst]),
        ("XMM/M128", &[Op::XmmReg, Op::M128]),
        ("XMM/M128{K}{Z}", &[Op::XmmReg, Op::M128, Op::K, Op::Z]),
        ("XMM/M128/M32BCST", &[Op::XmmReg, Op::M128, Op::M32Bcst]),
        ("XMM/M128/M64BCST", &[Op::XmmReg, Op::M128, Op::M64Bcst]),
        // ymm
        ("YMM{K}", &[Op::YmmReg, Op::K]),
        ("YMM{K}{Z}", &[Op::YmmReg, Op::K, Op::Z]),
        ("YMM/M256", &[Op::YmmReg, Op::M256]),
        ("YMM/M256{SAE}", &[Op::YmmReg, Op::M256, Op::Sae]),
        ("YMM/M256{K}{Z}", &[Op::YmmReg, Op::M256, Op::K, Op::Z]),
        ("YMM/M256/M32BCST", &[Op::YmmReg, Op::M256, Op::M32Bcst]),
        ("YMM/M256/M32BCST{ER}", &[Op::YmmReg, Op::M256, Op::M32Bcst, Op::Er]),
        ("YMM/M256/M32BCST{SAE}", &[Op::YmmReg, Op::M256, Op::M32Bcst, Op::Sae]),
        ("YMM/M256/M64BCST", &[Op::YmmReg, Op::M256, Op::M64Bcst]),
        // zmm
        ("ZMM{K}", &[Op::ZmmReg, Op::K]),
        ("ZMM{K}{Z}", &[Op::ZmmReg, Op::K, Op::Z]),
        ("ZMM{SAE}", &[Op::ZmmReg, Op::Sae]),
        ("ZMM/M512", &[Op::ZmmReg, Op::M512]),
        ("ZMM/M512{K}{Z}", &[Op::ZmmReg, Op::M512, Op::K, Op::Z]),
        ("ZMM/M512/M32BCST", &[Op::ZmmReg, Op::M512, Op::M32Bcst]),
        ("ZMM/M512/M32BCST{ER}", &[Op::ZmmReg, Op::M512, Op::M32Bcst, Op::Er]),
        ("ZMM/M512/M32BCST{SAE}", &[Op::ZmmReg, Op::M512, Op::M32Bcst, Op::Sae]),
        ("ZMM/M512/M64BCST", &[Op::ZmmReg, Op::M512, Op::M64Bcst]),
        ("ZMM/M512/M64BCST{ER}", &[Op::ZmmReg, Op::M512, Op::M64Bcst, Op::Er]),
        ("ZMM/M512/M64BCST{SAE}", &[Op::ZmmReg, Op::M512, Op::M64Bcst, Op::Sae]),
    ];
    ENTRIES.iter().copied().collect()
});

/// Expand one textual operand spec into the set of acceptable classes.
///
/// Single canonical tokens (`XMM`, `M128`, `IMM8`, ...) resolve directly;
/// composite specs go through the expansion table; anything else yields
/// `[Unknown]` so an evolving guide vocabulary cannot break matching.
pub fn parse_operand_spec(spec: &str) -> Vec<OperandClass> {
    let norm = spec.trim().to_ascii_uppercase();
    if norm.is_empty() {
        return vec![OperandClass::None];
    }
    if let Some(classes) = SPEC_TABLE.get(norm.as_str()) {
        return classes.to_vec();
    }
    let single = OperandClass::parse(&norm);
    if single != OperandClass::Unknown || norm == "UNKNOWN" {
        return vec![single];
    }
    log::warn!("unrecognized operand spec {spec:?}");
    vec![OperandClass::Unknown]
}
