use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if !self.universal && self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to the previous (left) part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        match (quote, ch) {
            (Some(q), _) if ch == q => {
                quote = None;
                current.push(ch);
            }
            (Some(_), _) => current.push(ch),
            (None, '\'' | '"') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '[') => {
                bracket_depth += 1;
                current.push(ch);
            }
            (None, ']') => {
                bracket_depth = bracket_depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
                current.push(ch);
            }
            (None, ',') if bracket_depth == 0 => {
                groups.push(parse_selector_chain(&current, selector)?);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if bracket_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    groups.push(parse_selector_chain(&current, selector)?);
    Ok(groups)
}

fn parse_selector_chain(chain: &str, selector: &str) -> Result<Vec<SelectorPart>> {
    let tokens = tokenize_selector(chain, selector)?;
    let mut parts = Vec::new();
    let mut pending_combinator: Option<SelectorCombinator> = None;

    for token in tokens {
        if token == ">" {
            if pending_combinator.is_some() || parts.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending_combinator = Some(SelectorCombinator::Child);
            continue;
        }

        let step = parse_selector_step(&token, selector)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(
                pending_combinator
                    .take()
                    .unwrap_or(SelectorCombinator::Descendant),
            )
        };
        parts.push(SelectorPart { step, combinator });
    }

    if parts.is_empty() || pending_combinator.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    Ok(parts)
}

fn tokenize_selector(chain: &str, selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.trim().is_empty() {
            tokens.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in chain.chars() {
        match ch {
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                bracket_depth = bracket_depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
                current.push(ch);
            }
            '>' if bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(">".to_string());
            }
            '+' | '~' | ':' if bracket_depth == 0 => {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            ch if ch.is_ascii_whitespace() && bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut tokens);
    Ok(tokens)
}

fn parse_selector_step(part: &str, selector: &str) -> Result<SelectorStep> {
    let unsupported = || Error::UnsupportedSelector(selector.into());
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = SelectorStep::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if step.universal || step.tag.is_some() || i != 0 {
                    return Err(unsupported());
                }
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_selector_ident(part, i + 1).ok_or_else(unsupported)?;
                if step.id.replace(id).is_some() {
                    return Err(unsupported());
                }
                i = next;
            }
            b'.' => {
                let (class_name, next) =
                    parse_selector_ident(part, i + 1).ok_or_else(unsupported)?;
                step.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_selector_attr_condition(part, i, selector)?;
                step.attrs.push(attr);
                i = next;
            }
            _ => {
                if i != 0 {
                    return Err(unsupported());
                }
                let (tag, next) = parse_selector_ident(part, i).ok_or_else(unsupported)?;
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    Ok(step)
}

fn parse_selector_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    if start >= bytes.len() || !is_selector_ident_char(bytes[start]) {
        return None;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_selector_ident_char(bytes[end]) {
        end += 1;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn is_selector_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn parse_selector_attr_condition(
    src: &str,
    open_bracket: usize,
    selector: &str,
) -> Result<(SelectorAttrCondition, usize)> {
    let unsupported = || Error::UnsupportedSelector(selector.into());
    let bytes = src.as_bytes();
    let mut i = open_bracket + 1;

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let key_start = i;
    while i < bytes.len() && (is_selector_ident_char(bytes[i]) || bytes[i] == b':') {
        i += 1;
    }
    if key_start == i {
        return Err(unsupported());
    }
    let key = src.get(key_start..i).ok_or_else(unsupported)?.to_ascii_lowercase();

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) == Some(&b']') {
        return Ok((SelectorAttrCondition::Exists { key }, i + 1));
    }

    let (op, after_op) = match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'='), _) => (b'=', i + 1),
        (Some(op @ (b'^' | b'$' | b'*' | b'~')), Some(b'=')) => (*op, i + 2),
        _ => return Err(unsupported()),
    };
    i = after_op;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    let value = match bytes.get(i) {
        Some(quote @ (b'"' | b'\'')) => {
            let start = i + 1;
            let end = bytes[start..]
                .iter()
                .position(|b| b == quote)
                .map(|pos| start + pos)
                .ok_or_else(unsupported)?;
            i = end + 1;
            src.get(start..end).ok_or_else(unsupported)?.to_string()
        }
        Some(_) => {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b']' {
                i += 1;
            }
            src.get(start..i).ok_or_else(unsupported)?.to_string()
        }
        None => return Err(unsupported()),
    };

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) != Some(&b']') {
        return Err(unsupported());
    }

    let cond = match op {
        b'=' => SelectorAttrCondition::Eq { key, value },
        b'^' => SelectorAttrCondition::StartsWith { key, value },
        b'$' => SelectorAttrCondition::EndsWith { key, value },
        b'*' => SelectorAttrCondition::Contains { key, value },
        _ => SelectorAttrCondition::Includes { key, value },
    };
    Ok((cond, i + 1))
}

impl Dom {
    pub(crate) fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if let Some(tag) = &step.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &step.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        if step
            .classes
            .iter()
            .any(|class_name| !self.has_class(node_id, class_name))
        {
            return false;
        }

        step.attrs.iter().all(|cond| match cond {
            SelectorAttrCondition::Exists { key } => element.attrs.contains_key(key),
            SelectorAttrCondition::Eq { key, value } => element.attrs.get(key) == Some(value),
            SelectorAttrCondition::StartsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.starts_with(value)),
            SelectorAttrCondition::EndsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.ends_with(value)),
            SelectorAttrCondition::Contains { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.contains(value.as_str())),
            SelectorAttrCondition::Includes { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| attr.split_whitespace().any(|token| token == value)),
        })
    }

    pub(crate) fn matches_selector_chain(&self, node_id: NodeId, parts: &[SelectorPart]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return false;
        };
        if !self.matches_step(node_id, &last.step) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }

        let combinator = last.combinator.unwrap_or(SelectorCombinator::Descendant);
        match combinator {
            SelectorCombinator::Child => self
                .parent(node_id)
                .is_some_and(|parent| self.matches_selector_chain(parent, rest)),
            SelectorCombinator::Descendant => {
                let mut cursor = self.parent(node_id);
                while let Some(ancestor) = cursor {
                    if self.matches_selector_chain(ancestor, rest) {
                        return true;
                    }
                    cursor = self.parent(ancestor);
                }
                false
            }
        }
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        if groups.len() == 1 && groups[0].len() == 1 {
            if let Some(id) = groups[0][0].step.id_only() {
                return Ok(self.by_id(id).into_iter().collect());
            }
        }

        self.query_selector_all_from(self.root, &groups)
    }

    pub(crate) fn query_selector_all_within(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        self.query_selector_all_from(root, &groups)
    }

    fn query_selector_all_from(
        &self,
        root: NodeId,
        groups: &[Vec<SelectorPart>],
    ) -> Result<Vec<NodeId>> {
        let mut candidates = Vec::new();
        self.collect_elements_dfs(root, &mut candidates);

        let mut seen = HashSet::new();
        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                groups
                    .iter()
                    .any(|parts| self.matches_selector_chain(*candidate, parts))
                    && seen.insert(*candidate)
            })
            .collect())
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }
}
