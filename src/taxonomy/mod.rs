//! Closed vocabularies used throughout the crate: return types, parameter
//! types, CPU feature flags, register classes and operand categories, with
//! total string conversions in both directions.
//!
//! Parsing is deliberately permissive: every vocabulary has an `Unknown`
//! sentinel and unrecognized input resolves to it instead of failing, because
//! the upstream guide's vocabulary drifts between releases. Callers handle
//! the sentinel explicitly; `as_str`/`Display` always emit one canonical
//! spelling per value.

pub mod cpu;
pub mod mnemonic;
pub mod operand_class;
pub mod paramtype;
pub mod register;
pub mod rettype;

pub use cpu::CpuFeatureSet;
pub use mnemonic::Mnemonic;
pub use operand_class::{parse_operand_spec, OperandClass};
pub use paramtype::ParamType;
pub use register::{Register, RegClass, VectorRegister};
pub use rettype::ReturnType;
