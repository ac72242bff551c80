//! The intrinsic data record: one documented overload of one intrinsic.

use std::fmt;

use crate::taxonomy::{CpuFeatureSet, Mnemonic, ParamType, ReturnType};

/// One `(type, name)` parameter position. Order within a record is fixed at
/// creation and defines positional matching for signature help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: ParamType,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: ParamType, name: impl Into<String>) -> Parameter {
        Parameter { ty, name: name.into() }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// One documented overload of one intrinsic function.
///
/// Free-text fields (`description`, `operation`, `performance`) are stored
/// opaquely; they may contain embedded markup and are formatted by display
/// collaborators, not here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntrinsicRecord {
    /// Canonical identifier, e.g. `_mm_add_epi32`. Multiple records may share
    /// a name for different overloads/CPU requirements.
    pub name: String,
    /// Item id from the guide document, `-1` when absent.
    pub id: i32,
    pub return_type: ReturnType,
    /// Ordered parameter list; position is significant.
    pub parameters: Vec<Parameter>,
    /// All CPU features this overload requires, combined.
    pub cpu_features: CpuFeatureSet,
    /// The underlying machine instruction, best-effort.
    pub mnemonic: Mnemonic,
    /// True for compiler/library-emulated routines (SVML) without a fixed
    /// instruction.
    pub is_library_routine: bool,
    pub description: String,
    pub operation: String,
    pub performance: String,
}

impl IntrinsicRecord {
    /// Canonical one-line signature, `rettype name(paramtype name, ...)`.
    ///
    /// Parameter positions here are the same positions the operand matcher
    /// evaluates, so rendered signature help and matching stay in lockstep.
    pub fn signature(&self) -> String {
        let mut out = String::new();
        out.push_str(self.return_type.as_str());
        out.push(' ');
        out.push_str(&self.name);
        out.push('(');
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&param.to_string());
        }
        out.push(')');
        out
    }
}

impl fmt::Display for IntrinsicRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}
