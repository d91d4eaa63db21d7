use super::*;

impl Dom {
    pub(crate) fn style_get(&self, node_id: NodeId, property: &str) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;
        let name = property.trim().to_ascii_lowercase();
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        Ok(decls
            .iter()
            .find(|(prop, _)| prop == &name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default())
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, property: &str, value: &str) -> Result<()> {
        let name = property.trim().to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == &name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name, value.to_string()));
        }

        element
            .attrs
            .insert("style".to_string(), serialize_style_declarations(&decls));
        Ok(())
    }
}

/// Splits an inline style attribute into ordered (property, value) pairs.
/// Later duplicates replace earlier ones in place.
pub(crate) fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    let mut push_decl = |decl: &str| {
        let Some((name, value)) = decl.split_once(':') else {
            return;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            return;
        }
        if let Some(existing) = out.iter_mut().find(|(prop, _)| *prop == name) {
            existing.1 = value.to_string();
        } else {
            out.push((name, value.to_string()));
        }
    };

    let bytes = style_attr.as_bytes();
    let mut start = 0usize;
    let mut i = 0usize;
    let mut paren_depth = 0usize;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let ch = bytes[i];
        match quote {
            Some(_) if ch == b'\\' => {
                i += 2;
                continue;
            }
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                b'\'' | b'"' => quote = Some(ch),
                b'(' => paren_depth += 1,
                b')' => paren_depth = paren_depth.saturating_sub(1),
                b';' if paren_depth == 0 => {
                    if let Some(decl) = style_attr.get(start..i) {
                        push_decl(decl);
                    }
                    start = i + 1;
                }
                _ => {}
            },
        }
        i += 1;
    }
    if let Some(decl) = style_attr.get(start..) {
        push_decl(decl);
    }

    out
}

pub(crate) fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    let mut out = String::new();
    for (idx, (name, value)) in decls.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}
