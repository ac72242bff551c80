//! Intrinsic return types.

use std::fmt;

use super::register::VectorRegister;

/// Return type of an intrinsic, as spelled in the guide's signature section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnType {
    /// Unrecognized or missing return type. Never satisfies a concrete
    /// compatibility check.
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
    Int8,
    Int16,
    Int32,
    Int64,
    Int,
    UInt32,
    UInt64,
    UChar,
    UInt,
    UShort,
    Float,
    Double,
    Void,
    VoidPtr,
    ConstVoidPtr,
}

impl ReturnType {
    /// Every variant, for exhaustive round-trip tests.
    pub const ALL: &'static [ReturnType] = &[
        ReturnType::Unknown,
        ReturnType::M64,
        ReturnType::M128,
        ReturnType::M128d,
        ReturnType::M128i,
        ReturnType::M256,
        ReturnType::M256d,
        ReturnType::M256i,
        ReturnType::M512,
        ReturnType::M512d,
        ReturnType::M512i,
        ReturnType::Mask8,
        ReturnType::Mask16,
        ReturnType::Mask32,
        ReturnType::Mask64,
        ReturnType::Int8,
        ReturnType::Int16,
        ReturnType::Int32,
        ReturnType::Int64,
        ReturnType::Int,
        ReturnType::UInt32,
        ReturnType::UInt64,
        ReturnType::UChar,
        ReturnType::UInt,
        ReturnType::UShort,
        ReturnType::Float,
        ReturnType::Double,
        ReturnType::Void,
        ReturnType::VoidPtr,
        ReturnType::ConstVoidPtr,
    ];

    /// Canonical spelling, as it appears in a rendered signature.
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnType::Unknown => "UNKNOWN",
            ReturnType::M64 => "__m64",
            ReturnType::M128 => "__m128",
            ReturnType::M128d => "__m128d",
            ReturnType::M128i => "__m128i",
            ReturnType::M256 => "__m256",
            ReturnType::M256d => "__m256d",
            ReturnType::M256i => "__m256i",
            ReturnType::M512 => "__m512",
            ReturnType::M512d => "__m512d",
            ReturnType::M512i => "__m512i",
            ReturnType::Mask8 => "__mmask8",
            ReturnType::Mask16 => "__mmask16",
            ReturnType::Mask32 => "__mmask32",
            ReturnType::Mask64 => "__mmask64",
            ReturnType::Int8 => "__int8",
            ReturnType::Int16 => "__int16",
            ReturnType::Int32 => "__int32",
            ReturnType::Int64 => "__int64",
            ReturnType::Int => "int",
            ReturnType::UInt32 => "unsigned __int32",
            ReturnType::UInt64 => "unsigned __int64",
            ReturnType::UChar => "unsigned char",
            ReturnType::UInt => "unsigned int",
            ReturnType::UShort => "unsigned short",
            ReturnType::Float => "float",
            ReturnType::Double => "double",
            ReturnType::Void => "void",
            ReturnType::VoidPtr => "void *",
            ReturnType::ConstVoidPtr => "const void *",
        }
    }

    /// Case-insensitive parse; unrecognized input yields
    /// [`ReturnType::Unknown`] so ingestion survives vocabulary drift.
    pub fn parse(s: &str) -> ReturnType {
        match s.trim().to_ascii_uppercase().as_str() {
            "UNKNOWN" => ReturnType::Unknown,
            "__M64" => ReturnType::M64,
            "__M128" => ReturnType::M128,
            "__M128D" => ReturnType::M128d,
            "__M128I" => ReturnType::M128i,
            "__M256" => ReturnType::M256,
            "__M256D" => ReturnType::M256d,
            "__M256I" => ReturnType::M256i,
            "__M512" => ReturnType::M512,
            "__M512D" => ReturnType::M512d,
            "__M512I" => ReturnType::M512i,
            "__MMASK8" => ReturnType::Mask8,
            "__MMASK16" => ReturnType::Mask16,
            "__MMASK32" => ReturnType::Mask32,
            "__MMASK64" => ReturnType::Mask64,
            "__INT8" => ReturnType::Int8,
            "__INT16" => ReturnType::Int16,
            "__INT32" => ReturnType::Int32,
            "__INT64" => ReturnType::Int64,
            "INT" => ReturnType::Int,
            "UNSIGNED __INT32" => ReturnType::UInt32,
            "UNSIGNED __INT64" => ReturnType::UInt64,
            "UNSIGNED CHAR" => ReturnType::UChar,
            "UNSIGNED INT" => ReturnType::UInt,
            "UNSIGNED SHORT" => ReturnType::UShort,
            "FLOAT" => ReturnType::Float,
            "DOUBLE" => ReturnType::Double,
            "VOID" => ReturnType::Void,
            "VOID *" | "VOID*" => ReturnType::VoidPtr,
            "CONST VOID *" | "CONST VOID*" | "VOID CONST *" | "VOID CONST*" => {
                ReturnType::ConstVoidPtr
            }
            _ => ReturnType::Unknown,
        }
    }

    /// SIMD register class this return type occupies, if any.
    pub fn register(self) -> Option<VectorRegister> {
        match self {
            ReturnType::M64 => Some(VectorRegister::M64),
            ReturnType::M128 => Some(VectorRegister::M128),
            ReturnType::M128d => Some(VectorRegister::M128d),
            ReturnType::M128i => Some(VectorRegister::M128i),
            ReturnType::M256 => Some(VectorRegister::M256),
            ReturnType::M256d => Some(VectorRegister::M256d),
            ReturnType::M256i => Some(VectorRegister::M256i),
            ReturnType::M512 => Some(VectorRegister::M512),
            ReturnType::M512d => Some(VectorRegister::M512d),
            ReturnType::M512i => Some(VectorRegister::M512i),
            ReturnType::Mask8 => Some(VectorRegister::Mask8),
            ReturnType::Mask16 => Some(VectorRegister::Mask16),
            ReturnType::Mask32 => Some(VectorRegister::Mask32),
            ReturnType::Mask64 => Some(VectorRegister::Mask64),
            _ => None,
        }
    }

    pub fn is_vector(self) -> bool {
        self.register().is_some()
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
