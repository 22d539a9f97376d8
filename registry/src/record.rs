use crate::StringRepr;
use serde::Deserialize;

/// A single registry entry. The same shape serves every subtag class;
/// `suppress` is only ever populated for languages and `prefixes` only for
/// extlangs and variants. `tag` keeps the registry's canonical spelling,
/// which for grandfathered and redundant entries is a whole mixed-case tag.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Record {
    pub tag: StringRepr,

    // Defaultable keys
    #[serde(default)]
    pub preferred: Option<StringRepr>,
    #[serde(default)]
    pub suppress: Option<StringRepr>,
    #[serde(default)]
    pub prefixes: Vec<StringRepr>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Record {
    #[inline]
    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    #[inline]
    pub fn suppress(&self) -> Option<&str> {
        self.suppress.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::Record;
    use serde_json::json;

    #[test]
    fn record() {
        let src = json!({
            "tag": "heploc",
            "prefixes": [ "ja-Latn-hepburn" ],
            "deprecated": true,
            "preferred": "alalc97"
        });
        let rec: Record = serde_json::from_value(src).unwrap();
        assert_eq!(
            rec,
            Record {
                tag: "heploc".into(),
                preferred: Some("alalc97".into()),
                prefixes: vec!["ja-Latn-hepburn".into()],
                deprecated: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn defaultable_keys() {
        let rec: Record = serde_json::from_value(json!({"tag": "Latn"})).unwrap();
        assert_eq!(rec.tag, "Latn");
        assert_eq!(rec.preferred(), None);
        assert_eq!(rec.suppress(), None);
        assert!(rec.prefixes.is_empty());
        assert!(!rec.deprecated);
    }
}
