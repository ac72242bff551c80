//! Simdguide - x86/x64 SIMD Intrinsic Metadata Engine
//!
//! A metadata model and lookup engine for the x86/x64 SIMD intrinsics
//! documented in the Intel intrinsics guide. The guide document is ingested
//! into typed records (signature, CPU feature requirements, instruction
//! mnemonic, documentation text), held in an immutable name-keyed store, and
//! queried by editor-style tooling: name lookup, feature filtering, and
//! call-site signature matching.
//!
//! # Layers
//!
//! - [`taxonomy`]: the closed vocabularies (return types, parameter types,
//!   CPU features, registers, operand classes), all with permissive parsing
//!   that maps unrecognized input to `Unknown` sentinels
//! - [`ingest`]: best-effort extraction of records from the guide document
//! - [`store`]: the immutable, document-ordered record store
//! - [`matcher`]: overload narrowing by features, operands, and return type
//! - [`cache`]: XML export/import that round-trips a store exactly
//!
//! # Example
//!
//! ```rust
//! use simdguide::store::IntrinsicStore;
//! use simdguide::taxonomy::CpuFeatureSet;
//!
//! let guide = r#"
//!     <div id="intrinsics_list">
//!       <div id="1">
//!         <div class="instruction">PADDD xmm, xmm</div>
//!         <div class="signature">
//!           <span class="rettype">__m128i</span>
//!           <span class="name">_mm_add_epi32</span>
//!           <span class="param_type">__m128i</span><span class="param_name">a</span>
//!           <span class="param_type">__m128i</span><span class="param_name">b</span>
//!         </div>
//!         <div class="details"><div class="cpuid">SSE2</div></div>
//!       </div>
//!     </div>"#;
//!
//! let store = IntrinsicStore::from_guide_str(guide).unwrap();
//! let hits = store.lookup("_mm_add_epi32");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].cpu_features, CpuFeatureSet::SSE2);
//! assert_eq!(
//!     hits[0].signature(),
//!     "__m128i _mm_add_epi32(__m128i a, __m128i b)"
//! );
//! ```

pub mod cache;
pub mod config;
pub mod ingest;
pub mod matcher;
pub mod record;
pub mod store;
pub mod taxonomy;

pub use record::{IntrinsicRecord, Parameter};
pub use store::IntrinsicStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
