//! Guide document ingestion.
//!
//! Walks the intrinsics-guide markup (a container element with
//! `id="intrinsics_list"`, one child item per documented intrinsic, fields
//! tagged by `class` attributes) and produces typed records in document
//! order.
//!
//! Parsing is best-effort per item: a malformed item keeps whatever fields
//! were extracted and falls back to `Unknown`/empty for the rest. Unknown
//! class tags and type tokens are logged and ignored, never fatal. Only a
//! document-level problem (unreadable file, no container element) aborts the
//! whole ingestion.

use std::path::Path;

use log::{debug, warn};
use roxmltree::{Document, Node};
use thiserror::Error;

use crate::record::{IntrinsicRecord, Parameter};
use crate::taxonomy::{CpuFeatureSet, Mnemonic, ParamType, ReturnType};

/// Document-level ingestion failure. Item-level problems are not errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read guide file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse guide document: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("guide document has no element with id \"intrinsics_list\"")]
    MissingList,
}

/// Parse a whole guide document into records, preserving document order.
pub fn parse_guide(text: &str) -> Result<Vec<IntrinsicRecord>, LoadError> {
    let doc = Document::parse(text)?;
    let list = doc
        .descendants()
        .find(|n| n.attribute("id") == Some("intrinsics_list"))
        .ok_or(LoadError::MissingList)?;

    let mut records = Vec::new();
    for item in list.children().filter(Node::is_element) {
        records.push(parse_item(item));
    }
    debug!("ingested {} intrinsic records", records.len());
    Ok(records)
}

/// Read and parse a guide file.
pub fn load_guide(path: &Path) -> Result<Vec<IntrinsicRecord>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_guide(&text)
}

/// Extract one record from one guide item. Infallible by design; missing or
/// malformed sub-sections leave the corresponding fields at their defaults.
fn parse_item(item: Node) -> IntrinsicRecord {
    let mut rec = IntrinsicRecord {
        id: item
            .attribute("id")
            .and_then(|v| v.parse().ok())
            .unwrap_or(-1),
        ..Default::default()
    };
    let mut param_types: Vec<ParamType> = Vec::new();
    let mut param_names: Vec<String> = Vec::new();

    for element in item.children().filter(Node::is_element) {
        match element.attribute("class").unwrap_or("").to_ascii_lowercase().as_str() {
            "instruction" => {
                let text = inner_text(element);
                let text = text.trim();
                if text == "..." {
                    // SVML-style library routine, no fixed instruction
                    rec.is_library_routine = true;
                    rec.mnemonic = Mnemonic::unknown();
                    rec.cpu_features |= CpuFeatureSet::SVML;
                } else {
                    rec.mnemonic = Mnemonic::parse(text);
                }
            }
            "signature" => {
                for sub in element.descendants().filter(Node::is_element) {
                    match sub.attribute("class").unwrap_or("").to_ascii_lowercase().as_str() {
                        "rettype" => rec.return_type = ReturnType::parse(&inner_text(sub)),
                        "name" => rec.name = inner_text(sub).trim().to_string(),
                        "param_type" => param_types.push(ParamType::parse(&inner_text(sub))),
                        "param_name" => param_names.push(inner_text(sub).trim().to_string()),
                        _ => {}
                    }
                }
            }
            "details" => {
                for sub in element.descendants().filter(Node::is_element) {
                    match sub.attribute("class").unwrap_or("").to_ascii_lowercase().as_str() {
                        "description" => rec.description = inner_text(sub).trim().to_string(),
                        "operation" => rec.operation = inner_text(sub).trim().to_string(),
                        "performance" => rec.performance = inner_text(sub).trim().to_string(),
                        "cpuid" => {
                            let features = CpuFeatureSet::parse_tag(&inner_text(sub));
                            if features == CpuFeatureSet::UNKNOWN {
                                warn!(
                                    "item {}: unknown cpuid tag {:?}",
                                    rec.id,
                                    inner_text(sub).trim()
                                );
                            }
                            rec.cpu_features |= features;
                        }
                        _ => {}
                    }
                }
            }
            // legacy marker: also available on Knights Corner
            "alsoknc" => rec.cpu_features |= CpuFeatureSet::KNCNI,
            "" => {}
            other => debug!("item {}: ignoring unexpected class {other:?}", rec.id),
        }
    }

    if param_types.len() != param_names.len() {
        warn!(
            "item {} ({}): {} param types but {} param names",
            rec.id,
            rec.name,
            param_types.len(),
            param_names.len()
        );
    }
    rec.parameters = param_types
        .into_iter()
        .zip(param_names)
        .map(|(ty, name)| Parameter { ty, name })
        .collect();

    if rec.name.is_empty() {
        warn!("item {}: no intrinsic name found", rec.id);
    }
    rec
}

/// Concatenated text of all text descendants, markup stripped.
fn inner_text(node: Node) -> String {
    let mut out = String::new();
    for n in node.descendants() {
        if n.is_text() {
            if let Some(t) = n.text() {
                out.push_str(t);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ITEM: &str = r#"
        <div id="intrinsics_list">
          <div id="42">
            <div class="instruction">PADDD xmm, xmm</div>
            <div class="signature">
              <span class="rettype">__m128i</span>
              <span class="name">_mm_add_epi32</span>
              (<span class="param_type">__m128i</span> <span class="param_name">a</span>,
               <span class="param_type">__m128i</span> <span class="param_name">b</span>)
            </div>
            <div class="details">
              <div class="description">Add packed 32-bit integers in <b>a</b> and <b>b</b>.</div>
              <div class="operation">dst[i+31:i] := a[i+31:i] + b[i+31:i]</div>
              <div class="cpuid">SSE2</div>
              <div class="performance">latency 1</div>
            </div>
          </div>
        </div>"#;

    #[test]
    fn parses_single_item() {
        let records = parse_guide(ONE_ITEM).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.name, "_mm_add_epi32");
        assert_eq!(rec.id, 42);
        assert_eq!(rec.return_type, ReturnType::M128i);
        assert_eq!(rec.parameters.len(), 2);
        assert_eq!(rec.parameters[0].ty, ParamType::M128i);
        assert_eq!(rec.parameters[1].name, "b");
        assert_eq!(rec.cpu_features, CpuFeatureSet::SSE2);
        assert_eq!(rec.mnemonic.as_str(), "PADDD");
        assert!(!rec.is_library_routine);
        assert_eq!(rec.description, "Add packed 32-bit integers in a and b.");
    }

    #[test]
    fn library_routine_placeholder() {
        let text = r#"
            <div id="intrinsics_list">
              <div id="7">
                <div class="instruction">...</div>
                <div class="signature">
                  <span class="rettype">__m128</span>
                  <span class="name">_mm_sin_ps</span>
                  <span class="param_type">__m128</span><span class="param_name">a</span>
                </div>
              </div>
            </div>"#;
        let records = parse_guide(text).unwrap();
        let rec = &records[0];
        assert!(rec.is_library_routine);
        assert!(rec.mnemonic.is_unknown());
        assert!(rec.cpu_features.contains(CpuFeatureSet::SVML));
    }

    #[test]
    fn malformed_item_does_not_abort() {
        let text = r#"
            <div id="intrinsics_list">
              <div id="1">
                <div class="signature">
                  <span class="rettype">__bogus_type</span>
                  <span class="name">_mm_mystery</span>
                </div>
                <div class="newfangled_section">ignored</div>
              </div>
              <div id="2">
                <div class="instruction">PXOR xmm, xmm</div>
                <div class="signature">
                  <span class="rettype">__m128i</span>
                  <span class="name">_mm_xor_si128</span>
                </div>
                <div class="details"><div class="cpuid">SSE2</div></div>
              </div>
            </div>"#;
        let records = parse_guide(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].return_type, ReturnType::Unknown);
        assert_eq!(records[0].name, "_mm_mystery");
        assert_eq!(records[1].name, "_mm_xor_si128");
    }

    #[test]
    fn unknown_cpuid_tag_maps_to_unknown_flag() {
        let text = r#"
            <div id="intrinsics_list">
              <div id="3">
                <div class="signature"><span class="name">_mm_future_op</span></div>
                <div class="details"><div class="cpuid">AMX_WEIRD</div></div>
              </div>
            </div>"#;
        let records = parse_guide(text).unwrap();
        assert_eq!(records[0].cpu_features, CpuFeatureSet::UNKNOWN);
        // an UNKNOWN requirement never matches any selection
        assert!(!records[0]
            .cpu_features
            .is_subset_of(CpuFeatureSet::all() - CpuFeatureSet::UNKNOWN));
    }

    #[test]
    fn missing_list_is_fatal() {
        assert!(matches!(
            parse_guide("<html><body/></html>"),
            Err(LoadError::MissingList)
        ));
    }

    #[test]
    fn document_order_is_preserved() {
        let text = r#"
            <div id="intrinsics_list">
              <div id="1"><div class="signature"><span class="name">_mm_b</span></div></div>
              <div id="2"><div class="signature"><span class="name">_mm_a</span></div></div>
              <div id="3"><div class="signature"><span class="name">_mm_c</span></div></div>
            </div>"#;
        let names: Vec<String> = parse_guide(text)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["_mm_b", "_mm_a", "_mm_c"]);
    }
}
