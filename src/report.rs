use crate::{tag::ParsedTag, StringRepr};
use std::{error::Error, fmt::Display};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Closed set of diagnostic codes emitted by the pipeline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum DiagnosticKind {
    EmptyTag,
    EmptySubtag,
    InvalidCharacter,
    SubtagTooLong,
    TagTooLong,
    MalformedLanguage,
    UnexpectedSubtag,
    DuplicateVariant,
    DuplicateSingleton,
    EmptyExtension,
    EmptyPrivateuse,
    UnknownLanguage,
    UnknownScript,
    UnknownRegion,
    UnknownVariant,
    BadExtlangPrefix,
    DeprecatedSubtag,
    VariantPrefixMismatch,
    UnknownSingleton,
    ReservedLanguage,
}

impl DiagnosticKind {
    /// The wire spelling of the code.
    pub fn code(self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            EmptyTag => "EMPTY_TAG",
            EmptySubtag => "EMPTY_SUBTAG",
            InvalidCharacter => "INVALID_CHARACTER",
            SubtagTooLong => "SUBTAG_TOO_LONG",
            TagTooLong => "TAG_TOO_LONG",
            MalformedLanguage => "MALFORMED_LANGUAGE",
            UnexpectedSubtag => "UNEXPECTED_SUBTAG",
            DuplicateVariant => "DUPLICATE_VARIANT",
            DuplicateSingleton => "DUPLICATE_SINGLETON",
            EmptyExtension => "EMPTY_EXTENSION",
            EmptyPrivateuse => "EMPTY_PRIVATEUSE",
            UnknownLanguage => "UNKNOWN_LANGUAGE",
            UnknownScript => "UNKNOWN_SCRIPT",
            UnknownRegion => "UNKNOWN_REGION",
            UnknownVariant => "UNKNOWN_VARIANT",
            BadExtlangPrefix => "BAD_EXTLANG_PREFIX",
            DeprecatedSubtag => "DEPRECATED_SUBTAG",
            VariantPrefixMismatch => "VARIANT_PREFIX_MISMATCH",
            UnknownSingleton => "UNKNOWN_SINGLETON",
            ReservedLanguage => "RESERVED_LANGUAGE",
        }
    }

    /// The level this code carries unless a check overrides it.
    pub fn default_level(self) -> Level {
        use DiagnosticKind::*;
        match self {
            DeprecatedSubtag | VariantPrefixMismatch | UnknownSingleton | ReservedLanguage => {
                Level::Warning
            }
            _ => Level::Error,
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Level {
    Error,
    Warning,
}

/// One finding, pinned to the subtag and byte offset that produced it.
/// Diagnostics are plain values; nothing in the pipeline panics or throws
/// them.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub level: Level,
    pub message: String,
    pub subtag: Option<StringRepr>,
    pub offset: Option<usize>,
    pub suggested_replacement: Option<StringRepr>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            level: kind.default_level(),
            message: message.into(),
            subtag: None,
            offset: None,
            suggested_replacement: None,
        }
    }

    pub(crate) fn subtag(mut self, subtag: impl AsRef<str>) -> Self {
        self.subtag = Some(subtag.as_ref().into());
        self
    }

    pub(crate) fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn maybe_offset(mut self, offset: Option<usize>) -> Self {
        self.offset = offset;
        self
    }

    pub(crate) fn suggest(mut self, replacement: impl AsRef<str>) -> Self {
        self.suggested_replacement = Some(replacement.as_ref().into());
        self
    }

    pub(crate) fn escalate(mut self) -> Self {
        self.level = Level::Error;
        self
    }

    #[inline]
    pub fn is_warning(&self) -> bool {
        self.level == Level::Warning
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{code}: {msg}", code = self.kind, msg = self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " at offset {offset}")?;
        }
        Ok(())
    }
}

impl Error for Diagnostic {}

/// The outcome of running the full pipeline over one input.
///
/// `tag` is present exactly when the input is well-formed; it is the
/// canonicalized parse. Well-formedness failures land in `errors` and clear
/// both verdicts; registry failures clear only `is_valid`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    pub is_well_formed: bool,
    pub is_valid: bool,
    pub tag: Option<ParsedTag>,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Report {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            self.warnings.push(diagnostic);
        } else {
            self.errors.push(diagnostic);
        }
    }

    /// Diagnostics of both levels, errors first, in emission order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }
}
