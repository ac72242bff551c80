//! Matcher Integration Tests
//!
//! Exercises the full narrowing pipeline an editor would run: recover the
//! call site from source text, look the name up, then filter overloads by
//! enabled features and the operands typed so far.

use simdguide::matcher::{
    best_match, callsite_context, filter_by_features, filter_by_operands, filter_by_return,
    Operand,
};
use simdguide::record::{IntrinsicRecord, Parameter};
use simdguide::store::IntrinsicStore;
use simdguide::taxonomy::{CpuFeatureSet, Mnemonic, ParamType, ReturnType};

fn record(
    name: &str,
    ret: ReturnType,
    params: &[(ParamType, &str)],
    features: CpuFeatureSet,
) -> IntrinsicRecord {
    IntrinsicRecord {
        name: name.to_string(),
        return_type: ret,
        parameters: params
            .iter()
            .map(|&(ty, n)| Parameter::new(ty, n))
            .collect(),
        cpu_features: features,
        mnemonic: Mnemonic::parse("VOP"),
        ..Default::default()
    }
}

/// Two _mm_slli_epi32-style overloads: one takes a vector count, one an
/// immediate count.
fn shift_overloads() -> Vec<IntrinsicRecord> {
    vec![
        record(
            "_mm_sll_epi32",
            ReturnType::M128i,
            &[(ParamType::M128i, "a"), (ParamType::M128i, "count")],
            CpuFeatureSet::SSE2,
        ),
        record(
            "_mm_slli_epi32",
            ReturnType::M128i,
            &[(ParamType::M128i, "a"), (ParamType::ConstInt, "imm8")],
            CpuFeatureSet::SSE2,
        ),
    ]
}

#[test]
fn test_immediate_rules_out_vector_parameter() {
    let records = shift_overloads();
    let ops = vec![Operand::parse("xmm2"), Operand::parse("3")];
    let hits = filter_by_operands(&records, &ops);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "_mm_slli_epi32");
}

#[test]
fn test_register_rules_out_immediate_parameter() {
    let records = shift_overloads();
    let ops = vec![Operand::parse("xmm2"), Operand::parse("xmm5")];
    let hits = filter_by_operands(&records, &ops);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "_mm_sll_epi32");
}

#[test]
fn test_partial_call_keeps_both_overloads() {
    let records = shift_overloads();
    let ops = vec![Operand::parse("xmm2")];
    assert_eq!(filter_by_operands(&records, &ops).len(), 2);
    // and nothing typed at all keeps everything
    assert_eq!(filter_by_operands(&records, &[]).len(), 2);
}

#[test]
fn test_excess_operands_reject_all() {
    let records = shift_overloads();
    let ops = vec![
        Operand::parse("xmm1"),
        Operand::parse("xmm2"),
        Operand::parse("xmm3"),
    ];
    assert!(filter_by_operands(&records, &ops).is_empty());
}

#[test]
fn test_unclassified_operand_is_never_disqualifying() {
    let records = shift_overloads();
    let ops = vec![Operand::parse("my_vec"), Operand::parse("shift_am")];
    assert_eq!(filter_by_operands(&records, &ops).len(), 2);
}

#[test]
fn test_feature_gate_and_first_match() {
    let records = vec![
        record(
            "_mm_fmadd_pd",
            ReturnType::M128d,
            &[],
            CpuFeatureSet::FMA,
        ),
        record(
            "_mm_fmadd_pd",
            ReturnType::M128d,
            &[],
            CpuFeatureSet::AVX512F | CpuFeatureSet::AVX512VL,
        ),
    ];
    let fma_only = filter_by_features(&records, CpuFeatureSet::SSE2 | CpuFeatureSet::FMA);
    assert_eq!(fma_only.len(), 1);
    assert_eq!(best_match(&fma_only).unwrap().cpu_features, CpuFeatureSet::FMA);

    let everything =
        filter_by_features(&records, CpuFeatureSet::all() - CpuFeatureSet::UNKNOWN);
    assert_eq!(everything.len(), 2);
    // ties break to document order
    assert_eq!(
        best_match(&everything).unwrap().cpu_features,
        CpuFeatureSet::FMA
    );
}

#[test]
fn test_unknown_feature_requirement_never_matches() {
    let records = vec![record(
        "_mm_future",
        ReturnType::M128i,
        &[],
        CpuFeatureSet::UNKNOWN,
    )];
    let hits = filter_by_features(&records, CpuFeatureSet::all() - CpuFeatureSet::UNKNOWN);
    assert!(hits.is_empty());
}

#[test]
fn test_return_type_filter() {
    let records = vec![
        record("_mm_a", ReturnType::M128i, &[], CpuFeatureSet::SSE2),
        record("_mm_b", ReturnType::M128d, &[], CpuFeatureSet::SSE2),
    ];
    let hits = filter_by_return(&records, ReturnType::M128d);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "_mm_b");
    assert_eq!(filter_by_return(&records, ReturnType::Unknown).len(), 2);
}

#[test]
fn test_callsite_to_store_pipeline() {
    let guide = r#"
        <div id="intrinsics_list">
          <div id="1">
            <div class="instruction">PSLLD xmm, imm8</div>
            <div class="signature">
              <span class="rettype">__m128i</span>
              <span class="name">_mm_slli_epi32</span>
              (<span class="param_type">__m128i</span> <span class="param_name">a</span>,
               <span class="param_type">const int</span> <span class="param_name">imm8</span>)
            </div>
            <div class="details"><div class="cpuid">SSE2</div></div>
          </div>
        </div>"#;
    let store = IntrinsicStore::from_guide_str(guide).unwrap();

    let line = "__m128i r = _mm_slli_epi32(v, ";
    let site = callsite_context(line).expect("cursor is inside a call");
    assert_eq!(site.name, "_mm_slli_epi32");
    assert_eq!(site.param_index, 1);

    let overloads = store.lookup(&site.name);
    assert_eq!(overloads.len(), 1);
    // the argument under the cursor must admit an immediate
    let param = &overloads[0].parameters[site.param_index];
    assert_eq!(param.ty, ParamType::ConstInt);
}

#[test]
fn test_callsite_nested_and_boundaries() {
    let site = callsite_context("x = f(g(1, 2), h(").unwrap();
    assert_eq!(site.name, "h");
    assert_eq!(site.param_index, 0);

    let site = callsite_context("x = f(g(1, 2), ").unwrap();
    assert_eq!(site.name, "f");
    assert_eq!(site.param_index, 1);

    assert!(callsite_context("done(); ").is_none());
}
