use crate::{
    lexer, parser,
    tag::{lowercase, uppercase, ParsedTag},
};
use bcp47_registry::Registry;

/// Rewrite a well-formed tag into its canonical form, in place: whole-tag
/// preferred values (grandfathered and redundant spellings), per-subtag
/// preferred values, extlang promotion, suppress-script removal and
/// singleton ordering, then reassembly. Running it on its own output is a
/// no-op.
pub(crate) fn canonicalize(tag: &mut ParsedTag, registry: &Registry) {
    if let Some(record) = tag
        .grandfathered
        .as_deref()
        .and_then(|g| registry.lookup_grandfathered(g))
    {
        match record.preferred() {
            Some(preferred) => {
                // The replacement can be a whole modern tag, so it goes back
                // through the parser.
                let Some(replacement) = reparse(preferred, registry) else {
                    return;
                };
                *tag = replacement;
            }
            // No modern equivalent; the parser already pinned the registry
            // spelling.
            None => return,
        }
    }

    if let Some(preferred) = registry
        .lookup_redundant(tag.as_str())
        .and_then(|record| record.preferred())
    {
        if let Some(replacement) = reparse(preferred, registry) {
            *tag = replacement;
        }
    }

    let preferred_language = tag
        .language
        .as_deref()
        .and_then(|language| registry.lookup_language(language))
        .and_then(|record| record.preferred());
    if let Some(preferred) = preferred_language {
        tag.language = Some(lowercase(preferred));
    }

    // An extlang with a registered preferred value replaces the whole
    // language-extlang pair.
    let promoted = tag
        .extlangs
        .first()
        .and_then(|extlang| registry.lookup_extlang(extlang))
        .and_then(|record| record.preferred());
    if let Some(preferred) = promoted {
        tag.language = Some(lowercase(preferred));
        tag.extlangs.remove(0);
    }

    let preferred_region = tag
        .region
        .as_deref()
        .and_then(|region| registry.lookup_region(region))
        .and_then(|record| record.preferred());
    if let Some(preferred) = preferred_region {
        tag.region = Some(uppercase(preferred));
    }

    let mut index = 0;
    while index < tag.variants.len() {
        let preferred = registry
            .lookup_variant(&tag.variants[index])
            .and_then(|record| record.preferred());
        match preferred {
            // A replacement shorter than any variant is a whole primary
            // language standing in for language-plus-variant.
            Some(preferred) if preferred.len() < 4 => {
                tag.language = Some(lowercase(preferred));
                tag.variants.remove(index);
            }
            Some(preferred) => {
                tag.variants[index] = lowercase(preferred);
                index += 1;
            }
            None => index += 1,
        }
    }
    // Substitution can reintroduce a variant that was already present.
    let mut seen = Vec::with_capacity(tag.variants.len());
    tag.variants.retain(|variant| {
        if seen.contains(variant) {
            false
        } else {
            seen.push(variant.clone());
            true
        }
    });

    let suppress = tag
        .language
        .as_deref()
        .and_then(|language| registry.lookup_language(language))
        .and_then(|record| record.suppress());
    if let (Some(script), Some(suppress)) = (tag.script.as_deref(), suppress) {
        if script.eq_ignore_ascii_case(suppress) {
            tag.script = None;
        }
    }

    // Singletons in ASCII order; values within a singleton keep their order.
    tag.extensions.sort_by_key(|extension| extension.singleton);

    tag.reassemble();
}

fn reparse(input: &str, registry: &Registry) -> Option<ParsedTag> {
    let tokens = lexer::scan(input).ok()?;
    parser::parse(input, &tokens, registry)
        .ok()
        .map(|parsed| parsed.tag)
}

#[cfg(test)]
mod test {
    use super::canonicalize;
    use crate::{lexer, parser, tag::ParsedTag};
    use bcp47_registry::Registry;

    fn canon(input: &str) -> ParsedTag {
        let registry = Registry::shared();
        let tokens = lexer::scan(input).expect("lexes");
        let mut tag = parser::parse(input, &tokens, registry).expect("parses").tag;
        canonicalize(&mut tag, registry);
        tag
    }

    #[test]
    fn case_only() {
        assert_eq!(canon("EN-us").as_str(), "en-US");
        assert_eq!(canon("zh-hans-cn").as_str(), "zh-Hans-CN");
    }

    #[test]
    fn grandfathered_replacements() {
        assert_eq!(canon("i-klingon").as_str(), "tlh");
        assert_eq!(canon("art-lojban").as_str(), "jbo");
        assert_eq!(canon("en-GB-oed").as_str(), "en-GB-oxendict");
        // Deprecated with no replacement keeps its registry spelling.
        assert_eq!(canon("I-ENOCHIAN").as_str(), "i-enochian");
        assert_eq!(canon("i-default").as_str(), "i-default");
    }

    #[test]
    fn redundant_replacements() {
        assert_eq!(canon("zh-cmn-Hant").as_str(), "cmn-Hant");
        assert_eq!(canon("sgn-US").as_str(), "ase");
        assert_eq!(canon("de-1901").as_str(), "de-1901");
    }

    #[test]
    fn deprecated_subtag_replacements() {
        assert_eq!(canon("in-ID").as_str(), "id-ID");
        assert_eq!(canon("iw").as_str(), "he");
        assert_eq!(canon("en-BU").as_str(), "en-MM");
        assert_eq!(canon("ja-Latn-hepburn-heploc").as_str(), "ja-Latn-hepburn-alalc97");
        assert_eq!(canon("hy-arevela").as_str(), "hy");
    }

    #[test]
    fn extlang_promotion() {
        assert_eq!(canon("zh-yue").as_str(), "yue");
        assert_eq!(canon("zh-yue-HK").as_str(), "yue-HK");
        assert_eq!(canon("ar-afb").as_str(), "afb");
    }

    #[test]
    fn suppress_script() {
        assert_eq!(canon("en-Latn-US").as_str(), "en-US");
        assert_eq!(canon("ru-Cyrl").as_str(), "ru");
        // No suppress-script on zh, so Hans stays.
        assert_eq!(canon("zh-Hans").as_str(), "zh-Hans");
        assert_eq!(canon("en-Cyrl").as_str(), "en-Cyrl");
    }

    #[test]
    fn singleton_order() {
        assert_eq!(
            canon("en-u-ca-gregory-a-bbb-x-private").as_str(),
            "en-a-bbb-u-ca-gregory-x-private"
        );
        // Values within one singleton keep their order.
        assert_eq!(canon("de-u-nu-latn-co-phonebk").as_str(), "de-u-nu-latn-co-phonebk");
    }

    #[test]
    fn idempotent() {
        for input in [
            "EN-us",
            "i-klingon",
            "zh-yue-HK",
            "en-Latn-US",
            "ja-Latn-hepburn-heploc",
            "zh-cmn-Hans",
            "hy-arevela",
            "en-u-ca-gregory-a-bbb-x-private",
            "x-private",
            "qaaa-CH",
        ] {
            let first = canon(input);
            let second = canon(first.as_str());
            assert_eq!(first.as_str(), second.as_str(), "input {input:?}");
        }
    }
}
