use crate::{
    parser::FieldOffsets,
    report::{Diagnostic, DiagnosticKind, Report},
    tag::ParsedTag,
    StringRepr,
};
use bcp47_registry::{Record, Registry};

/// Extension singletons with an RFC behind them; anything else draws an
/// `UNKNOWN_SINGLETON` warning.
const REGISTERED_SINGLETONS: &[char] = &['t', 'u'];

/// Predominant language per region, for the unknown-language-as-region
/// suggestion. Sorted by region code.
const REGION_LANGUAGES: &[(&str, &str)] = &[
    ("at", "de"),
    ("au", "en"),
    ("br", "pt"),
    ("ch", "de"),
    ("cl", "es"),
    ("cn", "zh"),
    ("gb", "en"),
    ("ie", "en"),
    ("jp", "ja"),
    ("mx", "es"),
    ("nz", "en"),
    ("pe", "es"),
    ("uk", "en"),
    ("us", "en"),
];

/// Frequent misspellings of language subtags: English names and the ISO
/// 639-2/3 codes that the registry folds into their 2-letter equivalents.
/// Sorted by the misspelling.
const LANGUAGE_SHORTHANDS: &[(&str, &str)] = &[
    ("chinese", "zh"),
    ("deu", "de"),
    ("dut", "nl"),
    ("eng", "en"),
    ("english", "en"),
    ("fra", "fr"),
    ("fre", "fr"),
    ("french", "fr"),
    ("ger", "de"),
    ("german", "de"),
    ("ita", "it"),
    ("italian", "it"),
    ("japanese", "ja"),
    ("jpn", "ja"),
    ("kor", "ko"),
    ("nld", "nl"),
    ("por", "pt"),
    ("rus", "ru"),
    ("spa", "es"),
    ("spanish", "es"),
    ("swe", "sv"),
    ("zho", "zh"),
];

/// Frequent misspellings of region subtags. Sorted by the misspelling.
const REGION_SHORTHANDS: &[(&str, &str)] = &[("uk", "GB"), ("usa", "US")];

/// Cross-check a well-formed tag against the registry, appending errors and
/// warnings to `report`. Checks run in grammar order so the diagnostics come
/// out in subtag order.
pub(crate) fn check(
    tag: &ParsedTag,
    offsets: &FieldOffsets,
    registry: &Registry,
    report: &mut Report,
) {
    if let Some(grandfathered) = tag.grandfathered() {
        check_grandfathered(grandfathered, registry, report);
        return;
    }

    let Some(language) = tag.language() else {
        // Purely private use: nothing the registry can say.
        return;
    };

    if language.len() == 4 {
        report.push(
            Diagnostic::new(
                DiagnosticKind::UnknownLanguage,
                format!("reserved language subtag {language:?} is not registered"),
            )
            .subtag(language)
            .maybe_offset(offsets.language),
        );
    } else if let Some(record) = registry.lookup_language(language) {
        deprecation(record, language, offsets.language, report);
    } else {
        let mut diagnostic = Diagnostic::new(
            DiagnosticKind::UnknownLanguage,
            format!("language subtag {language:?} is not registered"),
        )
        .subtag(language)
        .maybe_offset(offsets.language);
        if let Some(replacement) = suggest_language(language, registry) {
            diagnostic = diagnostic.suggest(replacement);
        }
        report.push(diagnostic);
    }

    for (extlang, &offset) in tag.extlangs().zip(offsets.extlangs.iter()) {
        match registry.lookup_extlang(extlang) {
            None => report.push(
                Diagnostic::new(
                    DiagnosticKind::BadExtlangPrefix,
                    format!("extended language subtag {extlang:?} is not registered"),
                )
                .subtag(extlang)
                .offset(offset),
            ),
            Some(record) => {
                if !record
                    .prefixes
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(language))
                {
                    report.push(
                        Diagnostic::new(
                            DiagnosticKind::BadExtlangPrefix,
                            format!(
                                "extended language subtag {extlang:?} does not attach to {language:?}"
                            ),
                        )
                        .subtag(extlang)
                        .offset(offset),
                    );
                }
                deprecation(record, extlang, Some(offset), report);
            }
        }
    }

    if let Some(script) = tag.script() {
        match registry.lookup_script(script) {
            None => report.push(
                Diagnostic::new(
                    DiagnosticKind::UnknownScript,
                    format!("script subtag {script:?} is not registered"),
                )
                .subtag(script)
                .maybe_offset(offsets.script),
            ),
            Some(record) => deprecation(record, script, offsets.script, report),
        }
    }

    if let Some(region) = tag.region() {
        match registry.lookup_region(region) {
            None => {
                let mut diagnostic = Diagnostic::new(
                    DiagnosticKind::UnknownRegion,
                    format!("region subtag {region:?} is not registered"),
                )
                .subtag(region)
                .maybe_offset(offsets.region);
                if let Some(replacement) = table_lookup(REGION_SHORTHANDS, region) {
                    diagnostic = diagnostic.suggest(replacement);
                }
                report.push(diagnostic);
            }
            Some(record) => deprecation(record, region, offsets.region, report),
        }
    }

    for (index, (variant, &offset)) in tag.variants().zip(offsets.variants.iter()).enumerate() {
        match registry.lookup_variant(variant) {
            None => report.push(
                Diagnostic::new(
                    DiagnosticKind::UnknownVariant,
                    format!("variant subtag {variant:?} is not registered"),
                )
                .subtag(variant)
                .offset(offset),
            ),
            Some(record) => {
                if !record.prefixes.is_empty() {
                    let so_far = composed_prefix(tag, index);
                    if !record.prefixes.iter().any(|p| prefix_matches(p, &so_far)) {
                        report.push(
                            Diagnostic::new(
                                DiagnosticKind::VariantPrefixMismatch,
                                format!(
                                    "variant {variant:?} is not meant for use with {so_far:?}"
                                ),
                            )
                            .subtag(variant)
                            .offset(offset),
                        );
                    }
                }
                deprecation(record, variant, Some(offset), report);
            }
        }
    }

    for (extension, &offset) in tag.extensions().iter().zip(offsets.singletons.iter()) {
        let singleton = extension.singleton();
        if !REGISTERED_SINGLETONS.contains(&singleton) {
            report.push(
                Diagnostic::new(
                    DiagnosticKind::UnknownSingleton,
                    format!("extension singleton {singleton:?} is not registered"),
                )
                .subtag(singleton.to_string())
                .offset(offset),
            );
        }
    }

    // A fully registered spelling of the whole tag can still be deprecated.
    if let Some(record) = registry.lookup_redundant(tag.as_str()) {
        deprecation(record, tag.as_str(), None, report);
    }
}

fn check_grandfathered(tag: &str, registry: &Registry, report: &mut Report) {
    let Some(record) = registry.lookup_grandfathered(tag) else {
        // Unreachable while the parser and validator share a registry.
        report.push(
            Diagnostic::new(
                DiagnosticKind::UnknownLanguage,
                format!("grandfathered tag {tag:?} is not registered"),
            )
            .subtag(tag),
        );
        return;
    };
    if record.deprecated {
        let mut diagnostic = Diagnostic::new(
            DiagnosticKind::DeprecatedSubtag,
            format!("grandfathered tag {tag:?} is deprecated"),
        )
        .subtag(tag)
        .offset(0);
        match record.preferred() {
            Some(preferred) => diagnostic = diagnostic.suggest(preferred),
            // No modern replacement exists, so the tag cannot be valid.
            None => diagnostic = diagnostic.escalate(),
        }
        report.push(diagnostic);
    }
}

fn deprecation(record: &Record, subtag: &str, offset: Option<usize>, report: &mut Report) {
    if record.deprecated {
        let mut diagnostic = Diagnostic::new(
            DiagnosticKind::DeprecatedSubtag,
            format!("subtag {subtag:?} is deprecated"),
        )
        .subtag(subtag)
        .maybe_offset(offset);
        if let Some(preferred) = record.preferred() {
            diagnostic = diagnostic.suggest(preferred);
        }
        report.push(diagnostic);
    }
}

/// The tag composed up to (but excluding) variant `index`, lowercased, for
/// variant prefix matching.
fn composed_prefix(tag: &ParsedTag, index: usize) -> String {
    let mut out = String::new();
    let mut push = |subtag: &str| {
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(subtag);
    };
    if let Some(language) = tag.language() {
        push(language);
    }
    for extlang in tag.extlangs() {
        push(extlang);
    }
    if let Some(script) = tag.script() {
        push(script);
    }
    if let Some(region) = tag.region() {
        push(region);
    }
    for variant in tag.variants().take(index) {
        push(variant);
    }
    out.make_ascii_lowercase();
    out
}

/// A registry prefix matches when it is a whole-subtag prefix of the
/// composed tag.
fn prefix_matches(prefix: &str, composed: &str) -> bool {
    let prefix = prefix.to_ascii_lowercase();
    composed == prefix
        || (composed.starts_with(&prefix) && composed.as_bytes().get(prefix.len()) == Some(&b'-'))
}

fn suggest_language(language: &str, registry: &Registry) -> Option<StringRepr> {
    if let Some(short) = table_lookup(LANGUAGE_SHORTHANDS, language) {
        return Some(short.into());
    }
    // A language slot holding a region code usually means the parts were
    // swapped; propose the region's predominant language in front of it.
    if registry.lookup_region(language).is_some() {
        if let Some(predominant) = table_lookup(REGION_LANGUAGES, language) {
            return Some(format!("{predominant}-{region}", region = language.to_ascii_uppercase()).into());
        }
    }
    None
}

fn table_lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    let key = key.to_ascii_lowercase();
    table
        .binary_search_by_key(&key.as_str(), |&(k, _)| k)
        .ok()
        .map(|at| table[at].1)
}
