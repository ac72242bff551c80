//! Call-site context recovery.
//!
//! Given the source text to the left of the cursor, find the intrinsic call
//! the cursor sits inside: the callee name and the zero-based index of the
//! argument currently being typed.

/// Enclosing call at a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub name: String,
    /// Zero-based index of the argument under the cursor.
    pub param_index: usize,
    /// Byte offset of the callee name within the scanned text.
    pub start: usize,
}

/// Scan backwards from the end of `before_cursor` for the innermost
/// unclosed call. Returns `None` when the cursor is not inside a call, or a
/// statement boundary intervenes.
pub fn callsite_context(before_cursor: &str) -> Option<CallSite> {
    let bytes = before_cursor.as_bytes();
    let mut depth = 0u32;
    let mut commas = 0usize;
    let mut open = None;
    for (i, &b) in bytes.iter().enumerate().rev() {
        match b {
            b')' | b']' => depth += 1,
            b'(' | b'[' => {
                if depth == 0 {
                    if b == b'[' {
                        return None;
                    }
                    open = Some(i);
                    break;
                }
                depth -= 1;
            }
            b',' if depth == 0 => commas += 1,
            b';' | b'{' | b'}' if depth == 0 => return None,
            _ => {}
        }
    }
    let open = open?;

    let mut end = open;
    while end > 0 && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    let mut start = end;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    if start == end {
        return None;
    }
    Some(CallSite {
        name: before_cursor[start..end].to_string(),
        param_index: commas,
        start,
    })
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
