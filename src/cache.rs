//! XML cache of an ingested store.
//!
//! Exporting and re-importing a store reproduces it exactly: the element
//! layout mirrors the record fields one-to-one and every field is written in
//! its canonical spelling, which the taxonomy parsers accept back verbatim.

use std::fmt::Write as _;
use std::path::Path;

use log::warn;
use roxmltree::{Document, Node};
use thiserror::Error;

use crate::record::{IntrinsicRecord, Parameter};
use crate::store::IntrinsicStore;
use crate::taxonomy::{CpuFeatureSet, Mnemonic, ParamType, ReturnType};

const ROOT_TAG: &str = "simdguide_data";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse cache document: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("cache document root is <{found}>, expected <{ROOT_TAG}>")]
    BadRoot { found: String },
}

/// Serialize a store to cache XML, in store order.
pub fn export(store: &IntrinsicStore) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<{ROOT_TAG}>");
    for rec in store.records() {
        let _ = writeln!(
            out,
            "  <intrinsic id=\"{}\" library=\"{}\">",
            rec.id, rec.is_library_routine
        );
        let _ = writeln!(out, "    <name>{}</name>", escape(&rec.name));
        let _ = writeln!(out, "    <rettype>{}</rettype>", rec.return_type.as_str());
        let _ = writeln!(
            out,
            "    <instruction>{}</instruction>",
            escape(rec.mnemonic.as_str())
        );
        let _ = writeln!(
            out,
            "    <cpuid>{}</cpuid>",
            rec.cpu_features.to_tag_string()
        );
        for p in &rec.parameters {
            let _ = writeln!(
                out,
                "    <param type=\"{}\" name=\"{}\"/>",
                escape(p.ty.as_str()),
                escape(&p.name)
            );
        }
        let _ = writeln!(out, "    <description>{}</description>", escape(&rec.description));
        let _ = writeln!(out, "    <operation>{}</operation>", escape(&rec.operation));
        let _ = writeln!(out, "    <performance>{}</performance>", escape(&rec.performance));
        out.push_str("  </intrinsic>\n");
    }
    let _ = writeln!(out, "</{ROOT_TAG}>");
    out
}

pub fn save(store: &IntrinsicStore, path: &Path) -> Result<(), CacheError> {
    std::fs::write(path, export(store))?;
    Ok(())
}

/// Rebuild a store from cache XML. Item-level anomalies are logged and
/// tolerated; only a malformed document or a wrong root element fails.
pub fn import(text: &str) -> Result<IntrinsicStore, CacheError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != ROOT_TAG {
        return Err(CacheError::BadRoot {
            found: root.tag_name().name().to_string(),
        });
    }
    let mut records = Vec::new();
    for item in root.children().filter(Node::is_element) {
        if item.tag_name().name() != "intrinsic" {
            warn!("cache: skipping unexpected element <{}>", item.tag_name().name());
            continue;
        }
        records.push(import_record(item));
    }
    Ok(IntrinsicStore::build(records))
}

fn import_record(item: Node) -> IntrinsicRecord {
    let mut rec = IntrinsicRecord {
        id: item
            .attribute("id")
            .and_then(|v| v.parse().ok())
            .unwrap_or(-1),
        is_library_routine: item.attribute("library") == Some("true"),
        ..Default::default()
    };
    for field in item.children().filter(Node::is_element) {
        let text = field.text().unwrap_or("");
        match field.tag_name().name() {
            "name" => rec.name = text.to_string(),
            "rettype" => rec.return_type = ReturnType::parse(text),
            "instruction" => rec.mnemonic = Mnemonic::parse(text),
            "cpuid" => rec.cpu_features = CpuFeatureSet::parse_tag_list(text),
            "param" => rec.parameters.push(Parameter {
                ty: ParamType::parse(field.attribute("type").unwrap_or("")),
                name: field.attribute("name").unwrap_or("").to_string(),
            }),
            "description" => rec.description = text.to_string(),
            "operation" => rec.operation = text.to_string(),
            "performance" => rec.performance = text.to_string(),
            other => warn!("cache: ignoring unknown field <{other}>"),
        }
    }
    rec
}

pub fn load(path: &Path) -> Result<IntrinsicStore, CacheError> {
    let text = std::fs::read_to_string(path)?;
    import(&text)
}

/// Minimal XML escape for text and attribute content. Ampersand first, so
/// already-escaped input is not double-escaped back into itself.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
