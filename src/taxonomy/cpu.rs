//! CPU feature flags.
//!
//! A record in the guide may require a combination of features (e.g. AVX512F
//! together with AVX512VL), so requirements are carried as a bitset and
//! matched against the user-selected feature set with a subset test.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Set of CPU feature flags, as tagged in the intrinsics guide.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CpuFeatureSet: u64 {
        const MMX          = 1 << 0;
        const SSE          = 1 << 1;
        const SSE2         = 1 << 2;
        const SSE3         = 1 << 3;
        const SSSE3        = 1 << 4;
        const SSE4_1       = 1 << 5;
        const SSE4_2       = 1 << 6;
        const AVX          = 1 << 7;
        const AVX2         = 1 << 8;
        const FMA          = 1 << 9;
        const AVX512F      = 1 << 10;
        const AVX512CD     = 1 << 11;
        const AVX512ER     = 1 << 12;
        const AVX512PF     = 1 << 13;
        const AVX512BW     = 1 << 14;
        const AVX512DQ     = 1 << 15;
        const AVX512VL     = 1 << 16;
        const AVX512IFMA52 = 1 << 17;
        const AVX512VBMI   = 1 << 18;
        const KNCNI        = 1 << 19;
        const SVML         = 1 << 20;
        const ADX          = 1 << 21;
        const AES          = 1 << 22;
        const BMI1         = 1 << 23;
        const BMI2         = 1 << 24;
        const CLFLUSHOPT   = 1 << 25;
        const FP16C        = 1 << 26;
        const FXSR         = 1 << 27;
        const MPX          = 1 << 28;
        const PCLMULQDQ    = 1 << 29;
        const RDRAND       = 1 << 30;
        const RDSEED       = 1 << 31;
        const SHA          = 1 << 32;
        const LZCNT        = 1 << 33;
        const POPCNT       = 1 << 34;

        /// Feature tag the parser did not recognize. Never matches a
        /// user-selected feature set, so records carrying it are filtered
        /// out rather than crashing ingestion.
        const UNKNOWN      = 1 << 63;
    }
}

/// Canonical tag spellings, one per flag, in display order.
const TAGS: &[(CpuFeatureSet, &str)] = &[
    (CpuFeatureSet::MMX, "MMX"),
    (CpuFeatureSet::SSE, "SSE"),
    (CpuFeatureSet::SSE2, "SSE2"),
    (CpuFeatureSet::SSE3, "SSE3"),
    (CpuFeatureSet::SSSE3, "SSSE3"),
    (CpuFeatureSet::SSE4_1, "SSE4.1"),
    (CpuFeatureSet::SSE4_2, "SSE4.2"),
    (CpuFeatureSet::AVX, "AVX"),
    (CpuFeatureSet::AVX2, "AVX2"),
    (CpuFeatureSet::FMA, "FMA"),
    (CpuFeatureSet::AVX512F, "AVX512F"),
    (CpuFeatureSet::AVX512CD, "AVX512CD"),
    (CpuFeatureSet::AVX512ER, "AVX512ER"),
    (CpuFeatureSet::AVX512PF, "AVX512PF"),
    (CpuFeatureSet::AVX512BW, "AVX512BW"),
    (CpuFeatureSet::AVX512DQ, "AVX512DQ"),
    (CpuFeatureSet::AVX512VL, "AVX512VL"),
    (CpuFeatureSet::AVX512IFMA52, "AVX512IFMA52"),
    (CpuFeatureSet::AVX512VBMI, "AVX512VBMI"),
    (CpuFeatureSet::KNCNI, "KNCNI"),
    (CpuFeatureSet::SVML, "SVML"),
    (CpuFeatureSet::ADX, "ADX"),
    (CpuFeatureSet::AES, "AES"),
    (CpuFeatureSet::BMI1, "BMI1"),
    (CpuFeatureSet::BMI2, "BMI2"),
    (CpuFeatureSet::CLFLUSHOPT, "CLFLUSHOPT"),
    (CpuFeatureSet::FP16C, "FP16C"),
    (CpuFeatureSet::FXSR, "FXSR"),
    (CpuFeatureSet::MPX, "MPX"),
    (CpuFeatureSet::PCLMULQDQ, "PCLMULQDQ"),
    (CpuFeatureSet::RDRAND, "RDRAND"),
    (CpuFeatureSet::RDSEED, "RDSEED"),
    (CpuFeatureSet::SHA, "SHA"),
    (CpuFeatureSet::LZCNT, "LZCNT"),
    (CpuFeatureSet::POPCNT, "POPCNT"),
    (CpuFeatureSet::UNKNOWN, "UNKNOWN"),
];

impl CpuFeatureSet {
    /// Parse a single guide tag. Case-insensitive; `SSE4_1` is accepted as a
    /// legacy spelling of `SSE4.1`. Unrecognized tags resolve to
    /// [`CpuFeatureSet::UNKNOWN`] rather than failing, because the guide's
    /// tag vocabulary grows over time.
    pub fn parse_tag(s: &str) -> CpuFeatureSet {
        let norm = s.trim().to_ascii_uppercase();
        let norm = match norm.as_str() {
            "SSE4_1" => "SSE4.1",
            "SSE4_2" => "SSE4.2",
            other => other,
        };
        for (flag, tag) in TAGS {
            if *tag == norm {
                return *flag;
            }
        }
        CpuFeatureSet::UNKNOWN
    }

    /// All required flags present in the selected set.
    /// This is the compatibility predicate used by the matcher.
    pub fn is_subset_of(self, selected: CpuFeatureSet) -> bool {
        selected.contains(self)
    }

    /// Canonical tag of a single-flag set, or `""` for empty/multi-flag sets.
    pub fn tag(self) -> &'static str {
        for (flag, tag) in TAGS {
            if self == *flag {
                return tag;
            }
        }
        ""
    }

    /// One-line description of a single feature flag, for tooltips.
    pub fn doc(self) -> &'static str {
        match self.bits() {
            b if b == Self::ADX.bits() => "Multi-Precision Add-Carry Instruction Extension",
            b if b == Self::AES.bits() => "Advanced Encryption Standard Extension",
            b if b == Self::AVX512F.bits() => "AVX512 Foundation (Knights Landing, Intel Xeon)",
            b if b == Self::AVX512CD.bits() => "AVX512 Conflict Detection",
            b if b == Self::AVX512ER.bits() => "AVX512 Exponential and Reciprocal (Knights Landing)",
            b if b == Self::AVX512PF.bits() => "AVX512 Prefetch (Knights Landing)",
            b if b == Self::AVX512BW.bits() => "AVX512 Byte and Word",
            b if b == Self::AVX512DQ.bits() => "AVX512 Doubleword and Quadword",
            b if b == Self::AVX512VL.bits() => "AVX512 Vector Length Extensions",
            b if b == Self::AVX512IFMA52.bits() => "AVX512 Integer Fused Multiply-Add",
            b if b == Self::AVX512VBMI.bits() => "AVX512 Vector Byte Manipulation Instructions",
            b if b == Self::BMI1.bits() => "Bit Manipulation Instruction Set 1",
            b if b == Self::BMI2.bits() => "Bit Manipulation Instruction Set 2",
            b if b == Self::FMA.bits() => "Fused Multiply-Add Instructions",
            b if b == Self::FP16C.bits() => "Half Precision Floating Point Conversion Instructions",
            b if b == Self::MPX.bits() => "Memory Protection Extensions",
            b if b == Self::PCLMULQDQ.bits() => "Carry-Less Multiplication Instructions",
            b if b == Self::SHA.bits() => "Secure Hash Algorithm Extensions",
            b if b == Self::SVML.bits() => "Short Vector Math Library (compiler-provided routines)",
            _ => "",
        }
    }

    /// Canonical comma-joined tag list, in display order. Empty string for
    /// the empty set.
    pub fn to_tag_string(self) -> String {
        let mut out = String::new();
        for (flag, tag) in TAGS {
            if self.contains(*flag) {
                if !out.is_empty() {
                    out.push_str(", ");
                }
                out.push_str(tag);
            }
        }
        out
    }

    /// Parse a comma-joined tag list, the inverse of [`to_tag_string`].
    ///
    /// [`to_tag_string`]: CpuFeatureSet::to_tag_string
    pub fn parse_tag_list(s: &str) -> CpuFeatureSet {
        let mut set = CpuFeatureSet::empty();
        for part in s.split(',') {
            let part = part.trim();
            if !part.is_empty() {
                set |= Self::parse_tag(part);
            }
        }
        set
    }

    /// Every individual flag, for exhaustive tests and table generation.
    pub fn all_flags() -> impl Iterator<Item = CpuFeatureSet> {
        TAGS.iter().map(|(flag, _)| *flag)
    }
}

impl fmt::Display for CpuFeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tag_string())
    }
}
