//! BCP-47 language tag processing: parsing, well-formedness checking,
//! registry validation and canonicalization for the grammar of
//! [RFC 5646](https://www.rfc-editor.org/rfc/rfc5646), backed by a bundled
//! snapshot of the IANA Language Subtag Registry.
//!
//! The pipeline distinguishes two strictness levels: a tag is *well-formed*
//! when it fits the ABNF, and *valid* when every subtag is also registered
//! and the cross-subtag constraints hold. One pass produces both verdicts, a
//! [`ParsedTag`] broken into components, a list of [`Diagnostic`]s pinned to
//! byte offsets, and the canonical rewrite:
//!
//! ```rust
//! let report = bcp47::validate_language_tag("EN-latn-us");
//! assert!(report.is_well_formed && report.is_valid);
//! assert_eq!(report.tag.unwrap().as_str(), "en-US");
//!
//! let report = bcp47::validate_language_tag("ch-DE");
//! assert!(report.is_well_formed && !report.is_valid);
//! assert_eq!(
//!     report.errors[0].suggested_replacement.as_deref(),
//!     Some("de-CH")
//! );
//! ```
//!
//! Lighter entry points cover the common single-question cases:
//!
//! ```rust
//! assert!(bcp47::is_well_formed("xx-YY"));
//! assert!(!bcp47::is_valid("xx-YY"));
//! assert_eq!(
//!     bcp47::canonicalize_tag("i-klingon").as_deref(),
//!     Some("tlh")
//! );
//! assert_eq!(bcp47::canonicalize_tag("en--US"), None);
//! ```

mod canonical;
mod lexer;
mod parser;
mod report;
mod tag;
mod validate;

pub use bcp47_registry::{Record, Registry};
pub use report::{Diagnostic, DiagnosticKind, Level, Report};
pub use tag::{Extension, ParsedTag};

#[cfg(feature = "compact")]
use compact_str::CompactString as StringRepr;
#[cfg(not(feature = "compact"))]
use std::string::String as StringRepr;

/// Per-call switches for [`validate_language_tag_with`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Options {
    /// Cross-check subtags against the registry. When off, only the grammar
    /// is checked and `is_valid` mirrors `is_well_formed`.
    pub check_registry: bool,
    /// Treat any warning as failing validity.
    pub warn_as_error: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            check_registry: true,
            warn_as_error: false,
        }
    }
}

/// Run the full pipeline over `input` against the bundled registry.
pub fn validate_language_tag(input: &str) -> Report {
    validate_with_registry(Registry::shared(), input, &Options::default())
}

/// [`validate_language_tag`] with explicit [`Options`].
pub fn validate_language_tag_with(input: &str, options: &Options) -> Report {
    validate_with_registry(Registry::shared(), input, options)
}

/// Run the full pipeline against a caller-supplied registry snapshot.
pub fn validate_with_registry(registry: &Registry, input: &str, options: &Options) -> Report {
    let mut report = Report::default();

    let tokens = match lexer::scan(input) {
        Ok(tokens) => tokens,
        Err(diagnostic) => {
            report.errors.push(diagnostic);
            return report;
        }
    };
    let parsed = match parser::parse(input, &tokens, registry) {
        Ok(parsed) => parsed,
        Err(diagnostic) => {
            report.errors.push(diagnostic);
            return report;
        }
    };
    report.is_well_formed = true;
    for warning in parsed.warnings {
        report.push(warning);
    }

    let mut tag = parsed.tag;
    if options.check_registry {
        validate::check(&tag, &parsed.offsets, registry, &mut report);
    }
    canonical::canonicalize(&mut tag, registry);

    report.is_valid =
        report.errors.is_empty() && !(options.warn_as_error && !report.warnings.is_empty());
    report.tag = Some(tag);
    report
}

/// Parse `input` without registry checks. `None` exactly when the input is
/// not well-formed.
pub fn parse_tag(input: &str) -> Option<ParsedTag> {
    let tokens = lexer::scan(input).ok()?;
    parser::parse(input, &tokens, Registry::shared())
        .ok()
        .map(|parsed| parsed.tag)
}

/// The canonical form of `input`, or `None` when it is not well-formed.
/// Canonicalization does not require validity: unknown-but-well-formed
/// subtags pass through with their case folded.
pub fn canonicalize_tag(input: &str) -> Option<String> {
    let registry = Registry::shared();
    let tokens = lexer::scan(input).ok()?;
    let mut tag = parser::parse(input, &tokens, registry).ok()?.tag;
    canonical::canonicalize(&mut tag, registry);
    Some(tag.as_str().to_owned())
}

/// Does `input` fit the RFC 5646 grammar?
pub fn is_well_formed(input: &str) -> bool {
    parse_tag(input).is_some()
}

/// Is `input` well-formed with every subtag registered and consistent?
pub fn is_valid(input: &str) -> bool {
    validate_language_tag(input).is_valid
}
