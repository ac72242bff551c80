//! Round-trip Tests
//!
//! The cache format and every taxonomy vocabulary must reproduce their
//! inputs exactly: export then import yields an equal store, and parsing a
//! canonical spelling yields the value that produced it.

use simdguide::cache;
use simdguide::store::IntrinsicStore;
use simdguide::taxonomy::{
    CpuFeatureSet, Mnemonic, OperandClass, ParamType, ReturnType, VectorRegister,
};

const GUIDE: &str = r#"
<div id="intrinsics_list">
  <div id="1">
    <div class="instruction">PADDD xmm, xmm</div>
    <div class="signature">
      <span class="rettype">__m128i</span>
      <span class="name">_mm_add_epi32</span>
      (<span class="param_type">__m128i</span> <span class="param_name">a</span>,
       <span class="param_type">__m128i</span> <span class="param_name">b</span>)
    </div>
    <div class="details">
      <div class="description">Add packed 32-bit integers in "a" &amp; "b".</div>
      <div class="operation">FOR j := 0 to 3: dst := a + b</div>
      <div class="cpuid">SSE2</div>
      <div class="performance">Skylake: 1 / 0.33</div>
    </div>
  </div>
  <div id="2">
    <div class="instruction">...</div>
    <div class="signature">
      <span class="rettype">__m512d</span>
      <span class="name">_mm512_log_pd</span>
      (<span class="param_type">__m512d</span> <span class="param_name">a</span>)
    </div>
    <div class="details"><div class="cpuid">AVX512F</div></div>
  </div>
  <div id="3">
    <div class="signature">
      <span class="rettype">void</span>
      <span class="name">_mm_clflush</span>
      (<span class="param_type">void const *</span> <span class="param_name">p</span>)
    </div>
    <div class="details"><div class="cpuid">SSE2</div></div>
  </div>
</div>"#;

#[test]
fn test_cache_roundtrip_reproduces_the_store() {
    let store = IntrinsicStore::from_guide_str(GUIDE).unwrap();
    let xml = cache::export(&store);
    let back = cache::import(&xml).unwrap();
    assert_eq!(back, store);
}

#[test]
fn test_cache_roundtrip_is_stable() {
    // a second trip through the cache produces the identical document
    let store = IntrinsicStore::from_guide_str(GUIDE).unwrap();
    let first = cache::export(&store);
    let second = cache::export(&cache::import(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_cache_loads_faster_path_preserves_everything() {
    let store = IntrinsicStore::from_guide_str(GUIDE).unwrap();
    let back = cache::import(&cache::export(&store)).unwrap();
    let rec = &back.lookup("_mm_add_epi32")[0];
    assert_eq!(rec.description, "Add packed 32-bit integers in \"a\" & \"b\".");
    assert_eq!(rec.performance, "Skylake: 1 / 0.33");
    assert_eq!(rec.mnemonic.as_str(), "PADDD");

    let svml = &back.lookup("_mm512_log_pd")[0];
    assert!(svml.is_library_routine);
    assert!(svml.cpu_features.contains(CpuFeatureSet::SVML));

    let clflush = &back.lookup("_mm_clflush")[0];
    assert_eq!(clflush.return_type, ReturnType::Void);
    assert_eq!(clflush.parameters[0].ty, ParamType::VoidConstPtr);
}

#[test]
fn test_return_type_spellings_roundtrip() {
    for &ty in ReturnType::ALL {
        assert_eq!(ReturnType::parse(ty.as_str()), ty, "{ty:?}");
    }
}

#[test]
fn test_param_type_spellings_roundtrip() {
    for &ty in ParamType::ALL {
        assert_eq!(ParamType::parse(ty.as_str()), ty, "{ty:?}");
    }
}

#[test]
fn test_operand_class_spellings_roundtrip() {
    for &class in OperandClass::ALL {
        assert_eq!(OperandClass::parse(class.as_str()), class, "{class:?}");
    }
}

#[test]
fn test_vector_register_spellings_roundtrip() {
    for &reg in VectorRegister::ALL {
        if reg != VectorRegister::Unknown {
            assert_eq!(VectorRegister::parse(reg.as_str()), reg, "{reg:?}");
        }
    }
}

#[test]
fn test_feature_tag_list_roundtrip() {
    for flag in CpuFeatureSet::all_flags() {
        assert_eq!(CpuFeatureSet::parse_tag(flag.tag()), flag);
    }
    let set = CpuFeatureSet::AVX512F | CpuFeatureSet::AVX512VL | CpuFeatureSet::SSE4_1;
    assert_eq!(CpuFeatureSet::parse_tag_list(&set.to_tag_string()), set);
    assert_eq!(
        CpuFeatureSet::parse_tag_list(""),
        CpuFeatureSet::empty()
    );
}

#[test]
fn test_mnemonic_roundtrip() {
    for text in ["PADDD", "VFMADD132PD", "UNKNOWN"] {
        let m = Mnemonic::parse(text);
        assert_eq!(Mnemonic::parse(m.as_str()), m);
    }
}

#[test]
fn test_empty_store_roundtrip() {
    let store = IntrinsicStore::default();
    let back = cache::import(&cache::export(&store)).unwrap();
    assert_eq!(back, store);
    assert!(back.is_empty());
}
