//! The annotated shader document and the pass structure it declares.
//!
//! A document is a single GLSL text whose pass blocks are selected by the
//! preprocessor:
//!
//! ```glsl
//! #ifdef PASS_0
//! #pragma PASS_0_PARAM ONCE;
//! #ifdef PASS_0_COMPUTE_SHADER
//! layout(local_size_x = 1) in;
//! void main() { /* ... */ }
//! #endif
//! #endif
//! ```
//!
//! Each stage is compiled from the whole document with the matching
//! `#define`s prepended, so only the guarded body survives preprocessing.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::parameters::{Params, Scope};
use crate::stage::StageKind;

/// Prefix used by pass guards, stage guards and pass-scope directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKeyword {
    /// `PASS_<i>`
    Pass,
    /// `PROGRAM_<i>`
    Program,
}

impl SectionKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKeyword::Pass => "PASS",
            SectionKeyword::Program => "PROGRAM",
        }
    }

    pub(crate) fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "PASS" => Some(SectionKeyword::Pass),
            "PROGRAM" => Some(SectionKeyword::Program),
            _ => None,
        }
    }

    /// Pick the keyword a document uses for its first pass.
    ///
    /// Falls back to [`SectionKeyword::Pass`] when the document declares no
    /// pass at all.
    pub fn detect(source: &str) -> Self {
        if contains_guard(source, "#ifdef PASS_0") {
            SectionKeyword::Pass
        } else if contains_guard(source, "#ifdef PROGRAM_0") {
            SectionKeyword::Program
        } else {
            SectionKeyword::Pass
        }
    }
}

impl fmt::Display for SectionKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable shader document.
#[derive(Debug, Clone)]
pub struct Document {
    path: Option<PathBuf>,
    source: String,
    keyword: SectionKeyword,
}

impl Document {
    /// Read a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Document {
            path: path.to_owned(),
            source,
        })?;
        debug!(?path, bytes = source.len(), "loaded shader document");

        let mut document = Self::from_source(source);
        document.path = Some(path.to_owned());
        Ok(document)
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        let source = source.into();
        let keyword = SectionKeyword::detect(&source);
        Self {
            path: None,
            source,
            keyword,
        }
    }

    /// Override the detected section keyword.
    pub fn with_keyword(mut self, keyword: SectionKeyword) -> Self {
        self.keyword = keyword;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn keyword(&self) -> SectionKeyword {
        self.keyword
    }

    pub fn global_params(&self) -> Params {
        Params::parse(&self.source, Scope::Global)
    }

    pub fn pass_params(&self, index: usize) -> Params {
        Params::parse(
            &self.source,
            Scope::Pass {
                keyword: self.keyword,
                index,
            },
        )
    }

    /// Whether `#ifdef <SCOPE>_<index>` appears in the document.
    pub fn has_pass(&self, index: usize) -> bool {
        contains_guard(&self.source, &format!("#ifdef {}_{index}", self.keyword))
    }

    /// Number of passes, counting contiguously from 0.
    ///
    /// Counting stops at the first missing index, so a document declaring
    /// passes 0 and 2 has a single pass.
    pub fn pass_count(&self) -> usize {
        (0..).take_while(|&index| self.has_pass(index)).count()
    }

    /// Stages guarded for pass `index`, in [`StageKind::ALL`] order.
    pub fn stages(&self, index: usize) -> Vec<StageKind> {
        StageKind::ALL
            .into_iter()
            .filter(|&stage| contains_guard(&self.source, &self.stage_guard(index, stage)))
            .collect()
    }

    /// Full source handed to the shader compiler for one stage of one pass.
    pub fn compilation_unit(&self, preamble: &str, index: usize, stage: StageKind) -> String {
        let keyword = self.keyword;
        let marker = stage.marker();
        format!(
            "{preamble}\n#define {keyword}_{index}\n#define {keyword}_{index}_{marker}_SHADER\n\n{}",
            self.source
        )
    }

    fn stage_guard(&self, index: usize, stage: StageKind) -> String {
        format!("#ifdef {}_{index}_{}_SHADER", self.keyword, stage.marker())
    }
}

/// Find `guard` as a whole token: the next character, if any, must not be
/// able to continue an identifier.
fn contains_guard(haystack: &str, guard: &str) -> bool {
    haystack.match_indices(guard).any(|(at, _)| {
        haystack[at + guard.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PASSES: &str = r#"
#pragma PARAM WIDTH 800;

#ifdef PASS_0
#pragma PASS_0_PARAM ONCE;
#ifdef PASS_0_COMPUTE_SHADER
layout(local_size_x = 1) in;
void main() {}
#endif
#endif

#ifdef PASS_1
#pragma PASS_1_PARAM VBO quad;
#ifdef PASS_1_VERTEX_SHADER
void main() {}
#endif
#ifdef PASS_1_FRAGMENT_SHADER
out vec4 defaultOutput;
void main() {}
#endif
#endif
"#;

    #[test]
    fn counts_contiguous_passes() {
        let document = Document::from_source(TWO_PASSES);
        assert_eq!(document.keyword(), SectionKeyword::Pass);
        assert_eq!(document.pass_count(), 2);
    }

    #[test]
    fn sparse_passes_stop_at_first_gap() {
        let document = Document::from_source(
            "#ifdef PASS_0\n#endif\n#ifdef PASS_2\n#endif\n#ifdef PASS_3\n#endif\n",
        );
        assert_eq!(document.pass_count(), 1);
    }

    #[test]
    fn empty_document_has_no_passes() {
        assert_eq!(Document::from_source("void main() {}").pass_count(), 0);
    }

    #[test]
    fn stage_guard_is_not_a_pass_guard() {
        // Only stage guards for pass 1, no `#ifdef PASS_1` on its own.
        let document = Document::from_source(
            "#ifdef PASS_0\n#endif\n#ifdef PASS_1_VERTEX_SHADER\n#endif\n#ifdef PASS_10\n#endif\n",
        );
        assert!(document.has_pass(0));
        assert!(!document.has_pass(1));
        assert!(document.has_pass(10));
        assert_eq!(document.pass_count(), 1);
    }

    #[test]
    fn detects_program_keyword() {
        let document = Document::from_source(
            "#ifdef PROGRAM_0\n#pragma PROGRAM_0_PARAM ONCE;\n#ifdef PROGRAM_0_COMPUTE_SHADER\n#endif\n#endif\n",
        );
        assert_eq!(document.keyword(), SectionKeyword::Program);
        assert_eq!(document.pass_count(), 1);
        assert_eq!(document.stages(0), vec![StageKind::Compute]);
        assert!(document.pass_params(0).contains("ONCE"));
    }

    #[test]
    fn keyword_can_be_forced() {
        let document = Document::from_source(TWO_PASSES).with_keyword(SectionKeyword::Program);
        assert_eq!(document.pass_count(), 0);
    }

    #[test]
    fn finds_stages_per_pass() {
        let document = Document::from_source(TWO_PASSES);
        assert_eq!(document.stages(0), vec![StageKind::Compute]);
        assert_eq!(
            document.stages(1),
            vec![StageKind::Vertex, StageKind::Fragment]
        );
        assert!(document.stages(2).is_empty());
    }

    #[test]
    fn stage_guards_need_an_exact_index() {
        let document = Document::from_source("#ifdef PASS_11_VERTEX_SHADER\n#endif\n");
        assert!(document.stages(1).is_empty());
        assert_eq!(document.stages(11), vec![StageKind::Vertex]);
    }

    #[test]
    fn pass_params_follow_index() {
        let document = Document::from_source(TWO_PASSES);
        assert!(document.pass_params(0).contains("ONCE"));
        assert_eq!(document.pass_params(1).get("VBO"), Some("quad"));
        assert_eq!(document.global_params().get("WIDTH"), Some("800"));
    }

    #[test]
    fn compilation_unit_defines_pass_and_stage() {
        let document = Document::from_source(TWO_PASSES);
        let unit = document.compilation_unit("#version 460 core", 1, StageKind::Fragment);

        assert!(unit.starts_with("#version 460 core\n"));
        assert!(unit.contains("#define PASS_1\n"));
        assert!(unit.contains("#define PASS_1_FRAGMENT_SHADER\n"));
        assert!(unit.ends_with(TWO_PASSES));
    }

    #[test]
    fn missing_file_is_a_document_error() {
        let err = Document::load("/definitely/not/here.glsl").unwrap_err();
        assert!(matches!(err, Error::Document { .. }));
    }
}
