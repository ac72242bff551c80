//! Intrinsic parameter types.

use std::fmt;

use super::operand_class::OperandClass;

/// Parameter type of one intrinsic argument position.
///
/// The vocabulary is the guide's: vector and mask registers, scalar C types,
/// pointer flavors and the `_MM_*_ENUM` control enums used by KNC/AVX512
/// conversion intrinsics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamType {
    /// Unrecognized or missing parameter type. Never compatible with a
    /// concrete typed operand.
    #[default]
    Unknown,
    M64,
    M128,
    M128ConstPtr,
    M128d,
    M128dConstPtr,
    M128i,
    M256,
    M256d,
    M256i,
    M512,
    M512d,
    M512i,
    Mask8,
    Mask16,
    Mask16Ptr,
    Mask32,
    Mask64,
    Int32,
    Int32Ptr,
    Int64,
    Int64ConstPtr,
    Int64Ptr,
    Int,
    IntConstPtr,
    ConstInt,
    UInt32,
    UInt32Ptr,
    UInt64,
    UInt64Ptr,
    UChar,
    UInt,
    UIntPtr,
    UShort,
    SizeT,
    Float,
    FloatConstPtr,
    Double,
    DoubleConstPtr,
    Void,
    VoidPtr,
    VoidConstPtr,
    ConstVoidPtr,
    ConstVoidPtrPtr,
    Broadcast32Enum,
    Broadcast64Enum,
    DownconvEpi32Enum,
    DownconvEpi64Enum,
    DownconvPdEnum,
    DownconvPsEnum,
    ExpAdjEnum,
    MantissaNormEnum,
    MantissaSignEnum,
    UpconvEpi32Enum,
    UpconvEpi64Enum,
    UpconvPdEnum,
    UpconvPsEnum,
    CmpIntEnum,
}

impl ParamType {
    /// Every variant, for exhaustive round-trip tests.
    pub const ALL: &'static [ParamType] = &[
        ParamType::Unknown,
        ParamType::M64,
        ParamType::M128,
        ParamType::M128ConstPtr,
        ParamType::M128d,
        ParamType::M128dConstPtr,
        ParamType::M128i,
        ParamType::M256,
        ParamType::M256d,
        ParamType::M256i,
        ParamType::M512,
        ParamType::M512d,
        ParamType::M512i,
        ParamType::Mask8,
        ParamType::Mask16,
        ParamType::Mask16Ptr,
        ParamType::Mask32,
        ParamType::Mask64,
        ParamType::Int32,
        ParamType::Int32Ptr,
        ParamType::Int64,
        ParamType::Int64ConstPtr,
        ParamType::Int64Ptr,
        ParamType::Int,
        ParamType::IntConstPtr,
        ParamType::ConstInt,
        ParamType::UInt32,
        ParamType::UInt32Ptr,
        ParamType::UInt64,
        ParamType::UInt64Ptr,
        ParamType::UChar,
        ParamType::UInt,
        ParamType::UIntPtr,
        ParamType::UShort,
        ParamType::SizeT,
        ParamType::Float,
        ParamType::FloatConstPtr,
        ParamType::Double,
        ParamType::DoubleConstPtr,
        ParamType::Void,
        ParamType::VoidPtr,
        ParamType::VoidConstPtr,
        ParamType::ConstVoidPtr,
        ParamType::ConstVoidPtrPtr,
        ParamType::Broadcast32Enum,
        ParamType::Broadcast64Enum,
        ParamType::DownconvEpi32Enum,
        ParamType::DownconvEpi64Enum,
        ParamType::DownconvPdEnum,
        ParamType::DownconvPsEnum,
        ParamType::ExpAdjEnum,
        ParamType::MantissaNormEnum,
        ParamType::MantissaSignEnum,
        ParamType::UpconvEpi32Enum,
        ParamType::UpconvEpi64Enum,
        ParamType::UpconvPdEnum,
        ParamType::UpconvPsEnum,
        ParamType::CmpIntEnum,
    ];

    /// Canonical spelling, as it appears in a rendered signature.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::Unknown => "UNKNOWN",
            ParamType::M64 => "__m64",
            ParamType::M128 => "__m128",
            ParamType::M128ConstPtr => "__m128 const *",
            ParamType::M128d => "__m128d",
            ParamType::M128dConstPtr => "__m128d const *",
            ParamType::M128i => "__m128i",
            ParamType::M256 => "__m256",
            ParamType::M256d => "__m256d",
            ParamType::M256i => "__m256i",
            ParamType::M512 => "__m512",
            ParamType::M512d => "__m512d",
            ParamType::M512i => "__m512i",
            ParamType::Mask8 => "__mmask8",
            ParamType::Mask16 => "__mmask16",
            ParamType::Mask16Ptr => "__mmask16 *",
            ParamType::Mask32 => "__mmask32",
            ParamType::Mask64 => "__mmask64",
            ParamType::Int32 => "__int32",
            ParamType::Int32Ptr => "__int32 *",
            ParamType::Int64 => "__int64",
            ParamType::Int64ConstPtr => "__int64 const *",
            ParamType::Int64Ptr => "__int64 *",
            ParamType::Int => "int",
            ParamType::IntConstPtr => "int const *",
            ParamType::ConstInt => "const int",
            ParamType::UInt32 => "unsigned __int32",
            ParamType::UInt32Ptr => "unsigned __int32 *",
            ParamType::UInt64 => "unsigned __int64",
            ParamType::UInt64Ptr => "unsigned __int64 *",
            ParamType::UChar => "unsigned char",
            ParamType::UInt => "unsigned int",
            ParamType::UIntPtr => "unsigned int *",
            ParamType::UShort => "unsigned short",
            ParamType::SizeT => "size_t",
            ParamType::Float => "float",
            ParamType::FloatConstPtr => "float const *",
            ParamType::Double => "double",
            ParamType::DoubleConstPtr => "double const *",
            ParamType::Void => "void",
            ParamType::VoidPtr => "void *",
            ParamType::VoidConstPtr => "void const *",
            ParamType::ConstVoidPtr => "const void *",
            ParamType::ConstVoidPtrPtr => "const void **",
            ParamType::Broadcast32Enum => "_MM_BROADCAST32_ENUM",
            ParamType::Broadcast64Enum => "_MM_BROADCAST64_ENUM",
            ParamType::DownconvEpi32Enum => "_MM_DOWNCONV_EPI32_ENUM",
            ParamType::DownconvEpi64Enum => "_MM_DOWNCONV_EPI64_ENUM",
            ParamType::DownconvPdEnum => "_MM_DOWNCONV_PD_ENUM",
            ParamType::DownconvPsEnum => "_MM_DOWNCONV_PS_ENUM",
            ParamType::ExpAdjEnum => "_MM_EXP_ADJ_ENUM",
            ParamType::MantissaNormEnum => "_MM_MANTISSA_NORM_ENUM",
            ParamType::MantissaSignEnum => "_MM_MANTISSA_SIGN_ENUM",
            ParamType::UpconvEpi32Enum => "_MM_UPCONV_EPI32_ENUM",
            ParamType::UpconvEpi64Enum => "_MM_UPCONV_EPI64_ENUM",
            ParamType::UpconvPdEnum => "_MM_UPCONV_PD_ENUM",
            ParamType::UpconvPsEnum => "_MM_UPCONV_PS_ENUM",
            ParamType::CmpIntEnum => "const _MM_CMPINT_ENUM",
        }
    }

    /// Case-insensitive parse. Spacing variants seen in the wild
    /// (`double const*` vs `double const *`) map to the same value;
    /// unrecognized input yields [`ParamType::Unknown`].
    pub fn parse(s: &str) -> ParamType {
        // collapse whitespace runs so "double  const *" and "double const*"
        // normalize to single spellings
        let mut norm = String::with_capacity(s.len());
        let mut prev_space = true;
        for c in s.trim().chars() {
            if c.is_whitespace() {
                if !prev_space {
                    norm.push(' ');
                }
                prev_space = true;
            } else {
                norm.push(c.to_ascii_uppercase());
                prev_space = false;
            }
        }
        let norm = norm.trim_end().replace(" *", "*").replace("* *", "**");
        match norm.as_str() {
            "UNKNOWN" => ParamType::Unknown,
            "__M64" => ParamType::M64,
            "__M128" => ParamType::M128,
            "__M128 CONST*" => ParamType::M128ConstPtr,
            "__M128D" => ParamType::M128d,
            "__M128D CONST*" => ParamType::M128dConstPtr,
            "__M128I" => ParamType::M128i,
            "__M256" => ParamType::M256,
            "__M256D" => ParamType::M256d,
            "__M256I" => ParamType::M256i,
            "__M512" => ParamType::M512,
            "__M512D" => ParamType::M512d,
            "__M512I" => ParamType::M512i,
            "__MMASK8" => ParamType::Mask8,
            "__MMASK16" => ParamType::Mask16,
            "__MMASK16*" => ParamType::Mask16Ptr,
            "__MMASK32" => ParamType::Mask32,
            "__MMASK64" => ParamType::Mask64,
            "__INT32" => ParamType::Int32,
            "__INT32*" => ParamType::Int32Ptr,
            "__INT64" => ParamType::Int64,
            "__INT64 CONST*" => ParamType::Int64ConstPtr,
            "__INT64*" => ParamType::Int64Ptr,
            "INT" => ParamType::Int,
            "INT CONST*" => ParamType::IntConstPtr,
            "CONST INT" => ParamType::ConstInt,
            "UNSIGNED __INT32" => ParamType::UInt32,
            "UNSIGNED __INT32*" => ParamType::UInt32Ptr,
            "UNSIGNED __INT64" => ParamType::UInt64,
            "UNSIGNED __INT64*" => ParamType::UInt64Ptr,
            "UNSIGNED CHAR" => ParamType::UChar,
            "UNSIGNED INT" => ParamType::UInt,
            "UNSIGNED INT*" => ParamType::UIntPtr,
            "UNSIGNED SHORT" => ParamType::UShort,
            "SIZE_T" => ParamType::SizeT,
            "FLOAT" => ParamType::Float,
            "FLOAT CONST*" => ParamType::FloatConstPtr,
            "DOUBLE" => ParamType::Double,
            "DOUBLE CONST*" => ParamType::DoubleConstPtr,
            "VOID" => ParamType::Void,
            "VOID*" => ParamType::VoidPtr,
            "VOID CONST*" => ParamType::VoidConstPtr,
            "CONST VOID*" => ParamType::ConstVoidPtr,
            "CONST VOID**" => ParamType::ConstVoidPtrPtr,
            "_MM_BROADCAST32_ENUM" => ParamType::Broadcast32Enum,
            "_MM_BROADCAST64_ENUM" => ParamType::Broadcast64Enum,
            "_MM_DOWNCONV_EPI32_ENUM" => ParamType::DownconvEpi32Enum,
            "_MM_DOWNCONV_EPI64_ENUM" => ParamType::DownconvEpi64Enum,
            "_MM_DOWNCONV_PD_ENUM" => ParamType::DownconvPdEnum,
            "_MM_DOWNCONV_PS_ENUM" => ParamType::DownconvPsEnum,
            "_MM_EXP_ADJ_ENUM" => ParamType::ExpAdjEnum,
            "_MM_MANTISSA_NORM_ENUM" => ParamType::MantissaNormEnum,
            "_MM_MANTISSA_SIGN_ENUM" => ParamType::MantissaSignEnum,
            "_MM_UPCONV_EPI32_ENUM" => ParamType::UpconvEpi32Enum,
            "_MM_UPCONV_EPI64_ENUM" => ParamType::UpconvEpi64Enum,
            "_MM_UPCONV_PD_ENUM" => ParamType::UpconvPdEnum,
            "_MM_UPCONV_PS_ENUM" => ParamType::UpconvPsEnum,
            "CONST _MM_CMPINT_ENUM" | "_MM_CMPINT_ENUM" => ParamType::CmpIntEnum,
            _ => ParamType::Unknown,
        }
    }

    /// Operand classes acceptable at a position of this type.
    ///
    /// This table drives positional matching: an already-lexed operand is
    /// compatible with the position when any listed class accepts it. An
    /// empty slice means no typed operand can satisfy the position (the
    /// `Unknown` sentinel, and `void`).
    pub fn allowed_classes(self) -> &'static [OperandClass] {
        use OperandClass as Op;
        match self {
            ParamType::Unknown | ParamType::Void => &[],

            ParamType::M64 => &[Op::MmxReg, Op::M64],
            ParamType::M128 | ParamType::M128d | ParamType::M128i => &[Op::XmmReg, Op::M128],
            ParamType::M256 | ParamType::M256d | ParamType::M256i => &[Op::YmmReg, Op::M256],
            ParamType::M512 | ParamType::M512d | ParamType::M512i => &[Op::ZmmReg, Op::M512],

            ParamType::Mask8 | ParamType::Mask16 | ParamType::Mask32 | ParamType::Mask64 => {
                &[Op::K]
            }

            ParamType::Int32 | ParamType::Int | ParamType::UInt32 | ParamType::UInt => {
                &[Op::R32, Op::M32, Op::Imm32]
            }
            ParamType::Int64 | ParamType::UInt64 | ParamType::SizeT => {
                &[Op::R64, Op::M64, Op::Imm64]
            }
            ParamType::UChar => &[Op::R8, Op::M8, Op::Imm8],
            ParamType::UShort => &[Op::R16, Op::M16, Op::Imm16],

            // immediate-constant categories accept any immediate that fits
            ParamType::ConstInt => &[Op::Imm],
            ParamType::Broadcast32Enum
            | ParamType::Broadcast64Enum
            | ParamType::DownconvEpi32Enum
            | ParamType::DownconvEpi64Enum
            | ParamType::DownconvPdEnum
            | ParamType::DownconvPsEnum
            | ParamType::ExpAdjEnum
            | ParamType::MantissaNormEnum
            | ParamType::MantissaSignEnum
            | ParamType::UpconvEpi32Enum
            | ParamType::UpconvEpi64Enum
            | ParamType::UpconvPdEnum
            | ParamType::UpconvPsEnum
            | ParamType::CmpIntEnum => &[Op::Imm8],

            ParamType::Float => &[Op::XmmReg, Op::M32],
            ParamType::Double => &[Op::XmmReg, Op::M64],

            ParamType::M128ConstPtr
            | ParamType::M128dConstPtr
            | ParamType::Mask16Ptr
            | ParamType::Int32Ptr
            | ParamType::Int64ConstPtr
            | ParamType::Int64Ptr
            | ParamType::IntConstPtr
            | ParamType::UInt32Ptr
            | ParamType::UInt64Ptr
            | ParamType::UIntPtr
            | ParamType::FloatConstPtr
            | ParamType::DoubleConstPtr
            | ParamType::VoidPtr
            | ParamType::VoidConstPtr
            | ParamType::ConstVoidPtr
            | ParamType::ConstVoidPtrPtr => &[Op::Mem],
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for &v in ParamType::ALL {
            assert_eq!(ParamType::parse(v.as_str()), v, "variant {v:?}");
        }
    }

    #[test]
    fn spacing_variants_collapse() {
        assert_eq!(ParamType::parse("double const*"), ParamType::DoubleConstPtr);
        assert_eq!(
            ParamType::parse("double  const *"),
            ParamType::DoubleConstPtr
        );
        assert_eq!(ParamType::parse("VOID CONST *"), ParamType::VoidConstPtr);
    }

    #[test]
    fn unrecognized_is_unknown() {
        assert_eq!(ParamType::parse("__tile"), ParamType::Unknown);
    }

    #[test]
    fn unknown_accepts_nothing() {
        assert!(ParamType::Unknown.allowed_classes().is_empty());
        assert!(ParamType::Void.allowed_classes().is_empty());
    }
}
