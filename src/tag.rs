use crate::{lexer, parser, report::Diagnostic, StringRepr};
use bcp47_registry::Registry;
use std::{
    fmt::{Display, Write},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// One extension sequence: a singleton and the non-empty value subtags that
/// follow it. Kept as an ordered association list entry rather than a map
/// key; a tag can hold at most 35 singletons.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Extension {
    pub(crate) singleton: char,
    pub(crate) values: Vec<StringRepr>,
}

impl Extension {
    #[inline]
    pub fn singleton(&self) -> char {
        self.singleton
    }

    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(AsRef::as_ref)
    }
}

impl Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_char(self.singleton)?;
        for value in &self.values {
            f.write_char('-').and(f.write_str(value))?;
        }
        Ok(())
    }
}

/// A well-formed language tag, broken into its RFC 5646 components.
///
/// Fields are held case-normalized (language, extlangs, variants, extension
/// and private-use subtags lowercase; script title case; region uppercase)
/// and `tag` is always the reassembly of the fields, so rendering a
/// `ParsedTag` never needs to re-derive anything. Grandfathered inputs set
/// only `grandfathered`; purely private-use inputs set only `private_use`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(DeserializeFromStr, SerializeDisplay))]
pub struct ParsedTag {
    pub(crate) language: Option<StringRepr>,
    pub(crate) extlangs: Vec<StringRepr>,
    pub(crate) script: Option<StringRepr>,
    pub(crate) region: Option<StringRepr>,
    pub(crate) variants: Vec<StringRepr>,
    pub(crate) extensions: Vec<Extension>,
    pub(crate) private_use: Vec<StringRepr>,
    pub(crate) grandfathered: Option<StringRepr>,
    pub(crate) tag: StringRepr,
}

impl ParsedTag {
    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[inline]
    pub fn extlangs(&self) -> impl Iterator<Item = &str> {
        self.extlangs.iter().map(AsRef::as_ref)
    }

    #[inline]
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    #[inline]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    #[inline]
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(AsRef::as_ref)
    }

    #[inline]
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// The extension sequence introduced by `singleton`, matched
    /// case-insensitively.
    pub fn extension(&self, singleton: char) -> Option<&Extension> {
        let singleton = singleton.to_ascii_lowercase();
        self.extensions.iter().find(|e| e.singleton == singleton)
    }

    #[inline]
    pub fn private_use(&self) -> impl Iterator<Item = &str> {
        self.private_use.iter().map(AsRef::as_ref)
    }

    #[inline]
    pub fn grandfathered(&self) -> Option<&str> {
        self.grandfathered.as_deref()
    }

    #[inline]
    pub fn is_grandfathered(&self) -> bool {
        self.grandfathered.is_some()
    }

    #[inline]
    pub fn is_private_use(&self) -> bool {
        self.language.is_none() && !self.private_use.is_empty()
    }

    /// The tag's current string form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    pub(crate) fn assemble(&self) -> StringRepr {
        if let Some(grandfathered) = &self.grandfathered {
            return grandfathered.clone();
        }
        let mut out = String::new();
        let mut push = |subtag: &str| {
            if !out.is_empty() {
                out.push('-');
            }
            out.push_str(subtag);
        };
        if let Some(language) = &self.language {
            push(language);
        }
        for extlang in &self.extlangs {
            push(extlang);
        }
        if let Some(script) = &self.script {
            push(script);
        }
        if let Some(region) = &self.region {
            push(region);
        }
        for variant in &self.variants {
            push(variant);
        }
        for extension in &self.extensions {
            push(extension.singleton.encode_utf8(&mut [0u8; 4]));
            for value in &extension.values {
                push(value);
            }
        }
        if !self.private_use.is_empty() {
            push("x");
            for value in &self.private_use {
                push(value);
            }
        }
        out.into()
    }

    /// Re-derive `tag` from the fields after a mutation.
    pub(crate) fn reassemble(&mut self) {
        self.tag = self.assemble();
    }
}

impl AsRef<str> for ParsedTag {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.tag
    }
}

impl Display for ParsedTag {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for ParsedTag {
    type Err = Diagnostic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = lexer::scan(s)?;
        parser::parse(s, &tokens, Registry::shared()).map(|parsed| parsed.tag)
    }
}

/// ASCII-only case helpers. Locale-sensitive case functions are never used
/// on subtags.
pub(crate) fn lowercase(s: &str) -> StringRepr {
    s.to_ascii_lowercase().into()
}

pub(crate) fn uppercase(s: &str) -> StringRepr {
    s.to_ascii_uppercase().into()
}

pub(crate) fn titlecase(s: &str) -> StringRepr {
    let mut out = s.to_ascii_lowercase();
    if let Some(first) = out.as_mut_str().get_mut(..1) {
        first.make_ascii_uppercase();
    }
    out.into()
}
