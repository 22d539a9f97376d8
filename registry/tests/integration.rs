use bcp47_registry::Registry;

#[test]
fn bundled_snapshot_loads() {
    let reg = Registry::shared();
    assert_eq!(reg.api_version(), "1.0.0");
    assert!(!reg.date().is_empty());
}

#[test]
fn language_lookups() {
    let reg = Registry::shared();
    assert_eq!(reg.lookup_language("en").unwrap().suppress(), Some("Latn"));
    assert_eq!(reg.lookup_language("EN").unwrap().suppress(), Some("Latn"));
    assert!(reg.lookup_language("zh").unwrap().suppress().is_none());
    assert!(reg.lookup_language("tlh").is_some());
    assert!(reg.lookup_language("uk").is_some());

    // Curated out of the snapshot; `xx` was never assigned at all.
    assert!(reg.lookup_language("ch").is_none());
    assert!(reg.lookup_language("xx").is_none());

    let iw = reg.lookup_language("iw").unwrap();
    assert!(iw.deprecated);
    assert_eq!(iw.preferred(), Some("he"));
}

#[test]
fn extlang_prefixes() {
    let reg = Registry::shared();
    let yue = reg.lookup_extlang("yue").unwrap();
    assert_eq!(yue.prefixes.as_slice(), &["zh"]);
    assert_eq!(yue.preferred(), Some("yue"));
    assert!(reg.lookup_extlang("en").is_none());
}

#[test]
fn script_and_region_lookups() {
    let reg = Registry::shared();
    assert!(reg.lookup_script("Hans").is_some());
    assert!(reg.lookup_script("hans").is_some());
    assert!(reg.lookup_script("Wxyz").is_none());

    assert!(reg.lookup_region("US").is_some());
    assert!(reg.lookup_region("419").is_some());
    assert!(reg.lookup_region("YY").is_none());
    let bu = reg.lookup_region("BU").unwrap();
    assert!(bu.deprecated);
    assert_eq!(bu.preferred(), Some("MM"));
}

#[test]
fn variant_lookups() {
    let reg = Registry::shared();
    assert_eq!(reg.lookup_variant("1901").unwrap().prefixes.as_slice(), &["de"]);
    let heploc = reg.lookup_variant("heploc").unwrap();
    assert!(heploc.deprecated);
    assert_eq!(heploc.preferred(), Some("alalc97"));
    assert!(reg.lookup_variant("fonipa").unwrap().prefixes.is_empty());
}

#[test]
fn whole_tag_lookups() {
    let reg = Registry::shared();
    let klingon = reg.grandfathered_exact_match("i-KLINGON").unwrap();
    assert_eq!(klingon.tag, "i-klingon");
    assert_eq!(klingon.preferred(), Some("tlh"));

    let oed = reg.lookup_grandfathered("en-gb-oed").unwrap();
    assert_eq!(oed.tag, "en-GB-oed");
    assert_eq!(oed.preferred(), Some("en-GB-oxendict"));

    // Deprecated without a replacement.
    let enochian = reg.lookup_grandfathered("i-enochian").unwrap();
    assert!(enochian.deprecated);
    assert_eq!(enochian.preferred(), None);

    assert_eq!(
        reg.lookup_redundant("zh-cmn-hans").unwrap().preferred(),
        Some("cmn-Hans")
    );
    assert!(reg.lookup_redundant("de-1901").unwrap().preferred().is_none());
}
