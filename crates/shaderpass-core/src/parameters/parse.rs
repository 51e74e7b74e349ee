//! Single-pass scan over every `#pragma ... PARAM` directive in a document.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Scope;
use crate::document::SectionKeyword;

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"#pragma (?:(PASS|PROGRAM)_(\d+)_)?PARAM (\S+)(?:\s(?:(\w+)|"([^"]*)"))?;"#)
        .expect("directive pattern is valid")
});

pub(super) struct Directive {
    pub(super) scope: Scope,
    pub(super) name: String,
    pub(super) value: String,
}

/// Every well-formed directive in `source`, in document order.
pub(super) fn directives(source: &str) -> impl Iterator<Item = Directive> + '_ {
    DIRECTIVE.captures_iter(source).filter_map(|caps| {
        let scope = match (caps.get(1), caps.get(2)) {
            (Some(keyword), Some(index)) => Scope::Pass {
                keyword: SectionKeyword::from_marker(keyword.as_str())?,
                // Indices too large for usize cannot name a real pass.
                index: index.as_str().parse().ok()?,
            },
            _ => Scope::Global,
        };
        let value = caps
            .get(5)
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());

        Some(Directive {
            scope,
            name: caps[3].to_owned(),
            value: value.to_owned(),
        })
    })
}
