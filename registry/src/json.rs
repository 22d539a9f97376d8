use crate::{record::Record, StringRepr};
use serde::Deserialize;
use std::{
    collections::HashMap as Map,
    io::{self, BufRead},
    sync::OnceLock,
};

/// The on-disk shape of a registry snapshot: a version header followed by
/// one record list per subtag class.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    api: StringRepr,
    date: StringRepr,
    #[serde(default)]
    languages: Vec<Record>,
    #[serde(default)]
    extlangs: Vec<Record>,
    #[serde(default)]
    scripts: Vec<Record>,
    #[serde(default)]
    regions: Vec<Record>,
    #[serde(default)]
    variants: Vec<Record>,
    #[serde(default)]
    grandfathered: Vec<Record>,
    #[serde(default)]
    redundant: Vec<Record>,
}

/// A frozen lookup surface over one registry snapshot. Keys are folded to
/// ASCII lowercase on both sides of every lookup; records keep their
/// canonical spelling. Immutable once built, so a single instance is safe
/// to share across threads.
#[derive(Debug, Default, PartialEq)]
pub struct Registry {
    api: StringRepr,
    date: StringRepr,
    languages: Map<StringRepr, Record>,
    extlangs: Map<StringRepr, Record>,
    scripts: Map<StringRepr, Record>,
    regions: Map<StringRepr, Record>,
    variants: Map<StringRepr, Record>,
    grandfathered: Map<StringRepr, Record>,
    redundant: Map<StringRepr, Record>,
}

impl Registry {
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let snapshot = serde_json::from_reader(reader)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(Registry::from_snapshot(snapshot))
    }

    /// The snapshot bundled into the crate, parsed once on first use and
    /// cached for the life of the process.
    pub fn shared() -> &'static Registry {
        static SHARED: OnceLock<Registry> = OnceLock::new();
        SHARED.get_or_init(|| {
            let snapshot = serde_json::from_str(include_str!("../data/registry.json"))
                .expect("bundled registry snapshot is well-formed JSON");
            Registry::from_snapshot(snapshot)
        })
    }

    fn from_snapshot(snapshot: Snapshot) -> Self {
        fn index(records: Vec<Record>) -> Map<StringRepr, Record> {
            let mut map: Map<StringRepr, Record> = records
                .into_iter()
                .map(|rec| (rec.tag.to_ascii_lowercase().into(), rec))
                .collect();
            map.shrink_to_fit();
            map
        }

        Registry {
            api: snapshot.api,
            date: snapshot.date,
            languages: index(snapshot.languages),
            extlangs: index(snapshot.extlangs),
            scripts: index(snapshot.scripts),
            regions: index(snapshot.regions),
            variants: index(snapshot.variants),
            grandfathered: index(snapshot.grandfathered),
            redundant: index(snapshot.redundant),
        }
    }

    #[inline]
    pub fn api_version(&self) -> &str {
        &self.api
    }

    #[inline]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[inline]
    pub fn lookup_language(&self, subtag: &str) -> Option<&Record> {
        lookup(&self.languages, subtag)
    }

    #[inline]
    pub fn lookup_extlang(&self, subtag: &str) -> Option<&Record> {
        lookup(&self.extlangs, subtag)
    }

    #[inline]
    pub fn lookup_script(&self, subtag: &str) -> Option<&Record> {
        lookup(&self.scripts, subtag)
    }

    #[inline]
    pub fn lookup_region(&self, subtag: &str) -> Option<&Record> {
        lookup(&self.regions, subtag)
    }

    #[inline]
    pub fn lookup_variant(&self, subtag: &str) -> Option<&Record> {
        lookup(&self.variants, subtag)
    }

    #[inline]
    pub fn lookup_grandfathered(&self, tag: &str) -> Option<&Record> {
        lookup(&self.grandfathered, tag)
    }

    #[inline]
    pub fn lookup_redundant(&self, tag: &str) -> Option<&Record> {
        lookup(&self.redundant, tag)
    }

    /// Whole-input grandfathered match, folding case before the lookup.
    #[inline]
    pub fn grandfathered_exact_match(&self, input: &str) -> Option<&Record> {
        self.lookup_grandfathered(input)
    }
}

fn lookup<'r>(map: &'r Map<StringRepr, Record>, key: &str) -> Option<&'r Record> {
    if key.bytes().any(|b| b.is_ascii_uppercase()) {
        map.get(key.to_ascii_lowercase().as_str())
    } else {
        map.get(key)
    }
}
