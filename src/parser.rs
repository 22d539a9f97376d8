use crate::{
    lexer::Token,
    report::{Diagnostic, DiagnosticKind},
    tag::{lowercase, titlecase, uppercase, Extension, ParsedTag},
};
use bcp47_registry::Registry;

/// Byte offsets of the classified components, kept aside for the validator
/// so its diagnostics can point back into the original input.
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldOffsets {
    pub language: Option<usize>,
    pub extlangs: Vec<usize>,
    pub script: Option<usize>,
    pub region: Option<usize>,
    pub variants: Vec<usize>,
    pub singletons: Vec<usize>,
}

pub(crate) struct Parsed {
    pub tag: ParsedTag,
    pub offsets: FieldOffsets,
    pub warnings: Vec<Diagnostic>,
}

/// Classify the token list left to right under the RFC 5646 positional
/// grammar: language, extlangs, script, region, variants, extensions,
/// private use. Stops at the first token that cannot be placed. The registry
/// is consulted only for the whole-input grandfathered match; everything
/// else is shape-driven.
pub(crate) fn parse(
    input: &str,
    tokens: &[Token],
    registry: &Registry,
) -> Result<Parsed, Diagnostic> {
    if let Some(record) = registry.grandfathered_exact_match(input) {
        let mut tag = ParsedTag {
            grandfathered: Some(record.tag.clone().into()),
            ..ParsedTag::default()
        };
        tag.reassemble();
        return Ok(Parsed {
            tag,
            offsets: FieldOffsets::default(),
            warnings: Vec::new(),
        });
    }

    let mut tag = ParsedTag::default();
    let mut offsets = FieldOffsets::default();
    let mut warnings = Vec::new();
    let mut i = 0;

    // The lexer guarantees at least one token of 1-8 ASCII alphanumerics.
    if !is_x(tokens[0].text) {
        let token = tokens[0];
        if token.text.len() < 2 || !is_alphabetic(token.text) {
            return Err(Diagnostic::new(
                DiagnosticKind::MalformedLanguage,
                format!(
                    "{subtag:?} cannot be a primary language subtag",
                    subtag = token.text
                ),
            )
            .subtag(token.text)
            .offset(token.offset));
        }
        if token.text.len() == 4 {
            warnings.push(
                Diagnostic::new(
                    DiagnosticKind::ReservedLanguage,
                    format!(
                        "4-letter primary language subtags such as {subtag:?} are reserved for future use",
                        subtag = token.text
                    ),
                )
                .subtag(token.text)
                .offset(token.offset),
            );
        }
        tag.language = Some(lowercase(token.text));
        offsets.language = Some(token.offset);
        i = 1;

        // Extlangs attach only to a 2-3 letter primary language.
        if token.text.len() <= 3 {
            while i < tokens.len()
                && tag.extlangs.len() < 3
                && tokens[i].text.len() == 3
                && is_alphabetic(tokens[i].text)
            {
                tag.extlangs.push(lowercase(tokens[i].text));
                offsets.extlangs.push(tokens[i].offset);
                i += 1;
            }
        }

        if i < tokens.len() && tokens[i].text.len() == 4 && is_alphabetic(tokens[i].text) {
            tag.script = Some(titlecase(tokens[i].text));
            offsets.script = Some(tokens[i].offset);
            i += 1;
        }

        if i < tokens.len() && is_region(tokens[i].text) {
            tag.region = Some(uppercase(tokens[i].text));
            offsets.region = Some(tokens[i].offset);
            i += 1;
        }

        while i < tokens.len() && is_variant(tokens[i].text) {
            let variant = lowercase(tokens[i].text);
            if tag.variants.contains(&variant) {
                return Err(Diagnostic::new(
                    DiagnosticKind::DuplicateVariant,
                    format!("variant {variant:?} appears more than once"),
                )
                .subtag(&variant)
                .offset(tokens[i].offset));
            }
            tag.variants.push(variant);
            offsets.variants.push(tokens[i].offset);
            i += 1;
        }

        while i < tokens.len() && tokens[i].text.len() == 1 && !is_x(tokens[i].text) {
            let start = tokens[i];
            let singleton = start.text.as_bytes()[0].to_ascii_lowercase() as char;
            if tag.extensions.iter().any(|e| e.singleton == singleton) {
                return Err(Diagnostic::new(
                    DiagnosticKind::DuplicateSingleton,
                    format!("extension singleton {singleton:?} appears more than once"),
                )
                .subtag(start.text)
                .offset(start.offset));
            }
            i += 1;
            let mut values = Vec::new();
            while i < tokens.len() && tokens[i].text.len() >= 2 {
                values.push(lowercase(tokens[i].text));
                i += 1;
            }
            if values.is_empty() {
                return Err(Diagnostic::new(
                    DiagnosticKind::EmptyExtension,
                    format!("extension singleton {singleton:?} has no value subtags"),
                )
                .subtag(start.text)
                .offset(start.offset));
            }
            offsets.singletons.push(start.offset);
            tag.extensions.push(Extension { singleton, values });
        }
    }

    if i < tokens.len() && is_x(tokens[i].text) {
        let start = tokens[i];
        i += 1;
        while i < tokens.len() {
            tag.private_use.push(lowercase(tokens[i].text));
            i += 1;
        }
        if tag.private_use.is_empty() {
            return Err(Diagnostic::new(
                DiagnosticKind::EmptyPrivateuse,
                "the private use singleton has no value subtags",
            )
            .subtag(start.text)
            .offset(start.offset));
        }
    }

    if i < tokens.len() {
        let token = tokens[i];
        return Err(Diagnostic::new(
            DiagnosticKind::UnexpectedSubtag,
            format!(
                "subtag {subtag:?} has no place in the tag's grammar",
                subtag = token.text
            ),
        )
        .subtag(token.text)
        .offset(token.offset));
    }

    tag.reassemble();
    Ok(Parsed {
        tag,
        offsets,
        warnings,
    })
}

#[inline]
fn is_x(subtag: &str) -> bool {
    subtag.len() == 1 && subtag.as_bytes()[0].eq_ignore_ascii_case(&b'x')
}

#[inline]
fn is_alphabetic(subtag: &str) -> bool {
    subtag.bytes().all(|b| b.is_ascii_alphabetic())
}

#[inline]
fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && is_alphabetic(subtag))
        || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()))
}

#[inline]
fn is_variant(subtag: &str) -> bool {
    subtag.len() >= 5 || (subtag.len() == 4 && subtag.as_bytes()[0].is_ascii_digit())
}

#[cfg(test)]
mod test {
    use super::{parse, DiagnosticKind};
    use crate::{lexer, tag::ParsedTag};
    use bcp47_registry::Registry;

    fn run(input: &str) -> Result<ParsedTag, DiagnosticKind> {
        let tokens = lexer::scan(input).map_err(|d| d.kind)?;
        parse(input, &tokens, Registry::shared())
            .map(|parsed| parsed.tag)
            .map_err(|d| d.kind)
    }

    #[test]
    fn component_classification() {
        let tag = run("sl-Latn-IT-rozaj-biske-u-co-phonebk-x-private").unwrap();
        assert_eq!(tag.language(), Some("sl"));
        assert_eq!(tag.script(), Some("Latn"));
        assert_eq!(tag.region(), Some("IT"));
        assert_eq!(tag.variants().collect::<Vec<_>>(), ["rozaj", "biske"]);
        assert_eq!(tag.extensions().len(), 1);
        assert_eq!(tag.private_use().collect::<Vec<_>>(), ["private"]);
    }

    #[test]
    fn extlangs_need_short_language() {
        let tag = run("zh-yue-HK").unwrap();
        assert_eq!(tag.language(), Some("zh"));
        assert_eq!(tag.extlangs().collect::<Vec<_>>(), ["yue"]);
        assert_eq!(tag.region(), Some("HK"));

        // A 5-8 letter language takes no extlangs; a trailing 3-letter
        // subtag has nowhere to go.
        assert_eq!(run("abcde-yue"), Err(DiagnosticKind::UnexpectedSubtag));
        // And no more than three ever attach.
        assert_eq!(
            run("zh-aaa-bbb-ccc-ddd"),
            Err(DiagnosticKind::UnexpectedSubtag)
        );
    }

    #[test]
    fn numeric_region_and_digit_variants() {
        let tag = run("es-419").unwrap();
        assert_eq!(tag.region(), Some("419"));
        let tag = run("de-CH-1901").unwrap();
        assert_eq!(tag.variants().collect::<Vec<_>>(), ["1901"]);
    }

    #[test]
    fn grandfathered_whole_input() {
        let cases = [
            ("i-klingon", "i-klingon"),
            ("I-KLINGON", "i-klingon"),
            ("en-GB-oed", "en-GB-oed"),
            ("zh-min-nan", "zh-min-nan"),
        ];
        for (input, canonical) in cases {
            let tag = run(input).unwrap();
            assert_eq!(tag.grandfathered(), Some(canonical), "input {input:?}");
            assert_eq!(tag.as_str(), canonical);
            assert_eq!(tag.language(), None);
        }
        // Not an exact match, so it parses as an ordinary tag.
        let tag = run("i-klingon-x-kli");
        assert_eq!(tag, Err(DiagnosticKind::MalformedLanguage));
    }

    #[test]
    fn private_use_only() {
        let tag = run("x-wadegile-priv").unwrap();
        assert!(tag.is_private_use());
        assert_eq!(tag.language(), None);
        assert_eq!(tag.private_use().collect::<Vec<_>>(), ["wadegile", "priv"]);
        assert_eq!(tag.as_str(), "x-wadegile-priv");
    }

    #[test]
    fn structural_errors() {
        assert_eq!(run("1"), Err(DiagnosticKind::MalformedLanguage));
        assert_eq!(run("a"), Err(DiagnosticKind::MalformedLanguage));
        assert_eq!(run("e1"), Err(DiagnosticKind::MalformedLanguage));
        assert_eq!(run("en-GB-u"), Err(DiagnosticKind::EmptyExtension));
        assert_eq!(run("en-a-b-c"), Err(DiagnosticKind::EmptyExtension));
        assert_eq!(run("en-x"), Err(DiagnosticKind::EmptyPrivateuse));
        assert_eq!(run("x"), Err(DiagnosticKind::EmptyPrivateuse));
        assert_eq!(
            run("de-DE-1901-1901"),
            Err(DiagnosticKind::DuplicateVariant)
        );
        assert_eq!(
            run("de-1901-1901"),
            Err(DiagnosticKind::DuplicateVariant)
        );
        assert_eq!(
            run("en-u-ca-u-nu"),
            Err(DiagnosticKind::DuplicateSingleton)
        );
        assert_eq!(run("en-US-GB"), Err(DiagnosticKind::UnexpectedSubtag));
    }

    #[test]
    fn duplicate_variants_fold_case() {
        assert_eq!(
            run("sl-rozaj-ROZAJ"),
            Err(DiagnosticKind::DuplicateVariant)
        );
    }

    #[test]
    fn reserved_language_warns() {
        let tokens = lexer::scan("qaaa-CH").unwrap();
        let parsed = parse("qaaa-CH", &tokens, Registry::shared()).unwrap();
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].kind, DiagnosticKind::ReservedLanguage);
        assert_eq!(parsed.tag.language(), Some("qaaa"));
        assert_eq!(parsed.tag.region(), Some("CH"));
    }

    #[test]
    fn case_is_normalized_during_classification() {
        let tag = run("EN-latn-us").unwrap();
        assert_eq!(tag.as_str(), "en-Latn-US");
        let tag = run("ZH-YUE").unwrap();
        assert_eq!(tag.as_str(), "zh-yue");
    }
}
