//! Parameter sets declared with `#pragma` directives.
//! Use [`Params::parse`] to collect the directives of one [`Scope`].
//! Well-known parameter names live in [`keys`].

pub mod keys;
mod parse;

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::document::SectionKeyword;
use crate::error::{Error, Result};

/// Which directives a [`Params`] collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `#pragma PARAM <name>[ <value>];`
    Global,
    /// `#pragma <SCOPE>_<index>_PARAM <name>[ <value>];`
    Pass {
        keyword: SectionKeyword,
        index: usize,
    },
}

/// Mapping from parameter name to its value.
///
/// A directive without a value is stored with an empty value and acts as a
/// boolean flag. Unknown names are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    /// Collect every directive of `scope` in `source`, left to right.
    ///
    /// Repeated names overwrite earlier values, so the last directive wins.
    /// Malformed directives are skipped.
    pub fn parse(source: &str, scope: Scope) -> Self {
        let mut params = Params::default();
        for directive in parse::directives(source) {
            if directive.scope == scope {
                params.insert(directive.name, directive.value);
            }
        }
        params
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether the parameter is present, with or without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Parse the value of `name`.
    ///
    /// Returns `Ok(None)` when the parameter is absent and a configuration
    /// error when it is present but does not parse as `T`.
    pub fn value<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                Error::configuration(format!("parameter {name} has invalid value `{raw}`"))
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
