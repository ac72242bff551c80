//! Signature matching: narrow a set of intrinsic overloads by enabled CPU
//! features, call-site operands, and expected return type.
//!
//! All filters keep document order, so [`best_match`] is simply the first
//! survivor. Filtering is forgiving by construction: an operand the lexer
//! could not classify never disqualifies a candidate, and a record parameter
//! of unknown type only admits unclassified operands.

mod callsite;
mod operand;

pub use callsite::{callsite_context, CallSite};
pub use operand::{class_accepts, Operand};

use crate::record::IntrinsicRecord;
use crate::taxonomy::{CpuFeatureSet, ParamType, ReturnType};

/// Keep records whose feature requirement is satisfied by `enabled`.
pub fn filter_by_features<'a>(
    records: &'a [IntrinsicRecord],
    enabled: CpuFeatureSet,
) -> Vec<&'a IntrinsicRecord> {
    records
        .iter()
        .filter(|r| r.cpu_features.is_subset_of(enabled))
        .collect()
}

/// Keep records accepting the given operands positionally. Positions beyond
/// the typed operands are not evaluated, so a partial call keeps matching as
/// the user types.
pub fn filter_by_operands<'a>(
    records: &'a [IntrinsicRecord],
    operands: &[Operand],
) -> Vec<&'a IntrinsicRecord> {
    records
        .iter()
        .filter(|r| accepts_operands(r, operands))
        .collect()
}

/// Keep records with the given return type. `Unknown` means "no constraint".
pub fn filter_by_return<'a>(
    records: &'a [IntrinsicRecord],
    ret: ReturnType,
) -> Vec<&'a IntrinsicRecord> {
    if ret == ReturnType::Unknown {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.return_type == ret).collect()
}

/// First candidate in document order.
pub fn best_match<'a>(records: &[&'a IntrinsicRecord]) -> Option<&'a IntrinsicRecord> {
    records.first().copied()
}

fn accepts_operands(record: &IntrinsicRecord, operands: &[Operand]) -> bool {
    if operands.len() > record.parameters.len() {
        return false;
    }
    operands.iter().zip(&record.parameters).all(|(op, param)| {
        let classes = param.ty.allowed_classes();
        if classes.is_empty() {
            // untyped parameter slot admits only unclassified input
            return param.ty == ParamType::Unknown && op.is_unknown();
        }
        classes.iter().any(|&class| class_accepts(class, op))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Parameter;
    use crate::taxonomy::Mnemonic;

    fn rec(name: &str, features: CpuFeatureSet, params: &[ParamType]) -> IntrinsicRecord {
        IntrinsicRecord {
            name: name.to_string(),
            return_type: ReturnType::M128i,
            parameters: params
                .iter()
                .enumerate()
                .map(|(i, &ty)| Parameter::new(ty, format!("p{i}")))
                .collect(),
            cpu_features: features,
            mnemonic: Mnemonic::parse("PADDD xmm, xmm"),
            ..Default::default()
        }
    }

    #[test]
    fn feature_filter_is_a_subset_test() {
        let records = vec![
            rec("a", CpuFeatureSet::SSE2, &[]),
            rec("b", CpuFeatureSet::AVX512F | CpuFeatureSet::AVX512VL, &[]),
        ];
        let hits = filter_by_features(&records, CpuFeatureSet::SSE | CpuFeatureSet::SSE2);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "a");
        // enabling more features can only grow the result
        let more = filter_by_features(
            &records,
            CpuFeatureSet::all() - CpuFeatureSet::UNKNOWN,
        );
        assert_eq!(more.len(), 2);
    }

    #[test]
    fn operand_filter_checks_positions_typed_so_far() {
        let records = vec![
            rec("vector", CpuFeatureSet::SSE2, &[ParamType::M128i, ParamType::M128i]),
            rec("shift", CpuFeatureSet::SSE2, &[ParamType::M128i, ParamType::ConstInt]),
        ];
        // first operand fits both overloads
        let xmm = vec![Operand::parse("xmm1")];
        assert_eq!(filter_by_operands(&records, &xmm).len(), 2);
        // an immediate in position 1 only fits the shift form
        let imm = vec![Operand::parse("xmm1"), Operand::parse("7")];
        let hits = filter_by_operands(&records, &imm);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "shift");
        // a register in position 1 only fits the vector form
        let regs = vec![Operand::parse("xmm1"), Operand::parse("xmm2")];
        let hits = filter_by_operands(&records, &regs);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "vector");
    }

    #[test]
    fn too_many_operands_reject() {
        let records = vec![rec("unary", CpuFeatureSet::SSE2, &[ParamType::M128i])];
        let ops = vec![Operand::parse("xmm0"), Operand::parse("xmm1")];
        assert!(filter_by_operands(&records, &ops).is_empty());
    }

    #[test]
    fn unknown_operand_never_disqualifies() {
        let records = vec![rec("f", CpuFeatureSet::SSE2, &[ParamType::M128i])];
        let ops = vec![Operand::parse("still_typ")];
        assert_eq!(filter_by_operands(&records, &ops).len(), 1);
    }

    #[test]
    fn best_match_is_first_in_document_order() {
        let records = vec![
            rec("first", CpuFeatureSet::FMA, &[]),
            rec("second", CpuFeatureSet::AVX512F, &[]),
        ];
        let refs: Vec<&IntrinsicRecord> = records.iter().collect();
        assert_eq!(best_match(&refs).unwrap().name, "first");
        assert!(best_match(&[]).is_none());
    }

    #[test]
    fn return_filter() {
        let mut other = rec("d", CpuFeatureSet::SSE2, &[]);
        other.return_type = ReturnType::M128d;
        let records = vec![rec("i", CpuFeatureSet::SSE2, &[]), other];
        let hits = filter_by_return(&records, ReturnType::M128d);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "d");
        assert_eq!(filter_by_return(&records, ReturnType::Unknown).len(), 2);
    }
}
