//! Mock communication records.
//!
//! The fixtures are JSON files under `crates/core/fixtures/`. They are embedded in the binary
//! and can be swapped for a directory of files with the same names via
//! [`CoreConfig`](crate::CoreConfig).

use crate::constants::{
    CALLS_FIXTURE, EMAILS_FIXTURE, ENCOUNTER_FIXTURE, FAXES_FIXTURE, SMS_FIXTURE,
};
use crate::entities::{
    Call, Communication, CommunicationKind, Email, Fax, ScribeEncounter, SmsConversation,
};
use crate::{CoreConfig, CoreError, CoreResult};
use serde::de::DeserializeOwned;
use std::path::Path;

const EMBEDDED_EMAILS: &str = include_str!("../fixtures/emails.json");
const EMBEDDED_FAXES: &str = include_str!("../fixtures/faxes.json");
const EMBEDDED_SMS: &str = include_str!("../fixtures/sms.json");
const EMBEDDED_CALLS: &str = include_str!("../fixtures/calls.json");
const EMBEDDED_ENCOUNTER: &str = include_str!("../fixtures/encounter.json");

/// In-memory set of fixture records, read-only once loaded.
#[derive(Clone, Debug)]
pub struct FixtureStore {
    emails: Vec<Email>,
    faxes: Vec<Fax>,
    sms: Vec<SmsConversation>,
    calls: Vec<Call>,
    encounter: ScribeEncounter,
}

fn parse<T: DeserializeOwned>(name: &str, json: &str) -> CoreResult<T> {
    serde_json::from_str(json).map_err(|source| CoreError::FixtureParse {
        name: name.to_string(),
        source,
    })
}

fn read(dir: &Path, name: &str) -> CoreResult<String> {
    let path = dir.join(name);
    std::fs::read_to_string(&path).map_err(|source| CoreError::FixtureRead { path, source })
}

impl FixtureStore {
    /// Load from the configured directory, or the embedded fixtures when none is set.
    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        match cfg.fixtures_dir() {
            Some(dir) => Self::load_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Parse the fixtures compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FixtureParse`] if an embedded file does not match the entity model.
    pub fn embedded() -> CoreResult<Self> {
        Ok(Self {
            emails: parse(EMAILS_FIXTURE, EMBEDDED_EMAILS)?,
            faxes: parse(FAXES_FIXTURE, EMBEDDED_FAXES)?,
            sms: parse(SMS_FIXTURE, EMBEDDED_SMS)?,
            calls: parse(CALLS_FIXTURE, EMBEDDED_CALLS)?,
            encounter: parse(ENCOUNTER_FIXTURE, EMBEDDED_ENCOUNTER)?,
        })
    }

    /// Read every fixture file from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FixtureRead`] if a file is missing or unreadable, and
    /// [`CoreError::FixtureParse`] if its contents do not match the entity model.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        tracing::info!("loading fixtures from {}", dir.display());
        Ok(Self {
            emails: parse(EMAILS_FIXTURE, &read(dir, EMAILS_FIXTURE)?)?,
            faxes: parse(FAXES_FIXTURE, &read(dir, FAXES_FIXTURE)?)?,
            sms: parse(SMS_FIXTURE, &read(dir, SMS_FIXTURE)?)?,
            calls: parse(CALLS_FIXTURE, &read(dir, CALLS_FIXTURE)?)?,
            encounter: parse(ENCOUNTER_FIXTURE, &read(dir, ENCOUNTER_FIXTURE)?)?,
        })
    }

    /// All records of one kind, in fixture order.
    pub fn list(&self, kind: CommunicationKind) -> Vec<Communication> {
        match kind {
            CommunicationKind::Email => {
                self.emails.iter().cloned().map(Communication::Email).collect()
            }
            CommunicationKind::Fax => self.faxes.iter().cloned().map(Communication::Fax).collect(),
            CommunicationKind::Sms => self.sms.iter().cloned().map(Communication::Sms).collect(),
            CommunicationKind::Call => {
                self.calls.iter().cloned().map(Communication::Call).collect()
            }
        }
    }

    /// Look up one record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] when no record of `kind` has `id`.
    pub fn get(&self, kind: CommunicationKind, id: &str) -> CoreResult<Communication> {
        self.list(kind)
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| CoreError::NotFound {
                kind,
                id: id.to_string(),
            })
    }

    pub fn encounter(&self) -> &ScribeEncounter {
        &self.encounter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{all_item_ids, OutlineItem};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn assert_tree_invariants(items: &[OutlineItem]) {
        for item in items {
            if item.is_section() {
                assert!(!item.children().is_empty(), "empty section {}", item.id);
                assert!(item.count.is_some(), "section {} without count", item.id);
            }
            assert_tree_invariants(item.children());
        }
    }

    #[test]
    fn embedded_fixtures_parse() {
        let store = FixtureStore::embedded().expect("embedded fixtures are valid");
        for kind in CommunicationKind::ALL {
            let records = store.list(kind);
            assert!(!records.is_empty(), "no {kind} fixtures");
            assert!(records.iter().all(|record| record.kind() == kind));
        }
        assert!(store.encounter().has_patient());
    }

    #[test]
    fn every_fixture_builds_a_consistent_outline() {
        let store = FixtureStore::embedded().unwrap();
        for kind in CommunicationKind::ALL {
            for record in store.list(kind) {
                let outline = record.build_outline();
                assert_tree_invariants(&outline);

                let ids = all_item_ids(&outline);
                let unique: HashSet<&String> = ids.iter().collect();
                assert_eq!(unique.len(), ids.len(), "duplicate ids in {}", record.id());
                assert_eq!(ids, all_item_ids(&record.build_outline()));
            }
        }
    }

    #[test]
    fn get_reports_missing_records() {
        let store = FixtureStore::embedded().unwrap();
        assert_eq!(store.get(CommunicationKind::Email, "email-001").unwrap().id(), "email-001");

        let err = store.get(CommunicationKind::Fax, "fax-999").unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound { kind: CommunicationKind::Fax, ref id } if id == "fax-999"
        ));
        assert_eq!(err.to_string(), "fax not found: fax-999");
    }

    #[test]
    fn loads_fixtures_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(EMAILS_FIXTURE), EMBEDDED_EMAILS).unwrap();
        std::fs::write(dir.path().join(FAXES_FIXTURE), "[]").unwrap();
        std::fs::write(dir.path().join(SMS_FIXTURE), "[]").unwrap();
        std::fs::write(dir.path().join(CALLS_FIXTURE), "[]").unwrap();
        std::fs::write(dir.path().join(ENCOUNTER_FIXTURE), "{}").unwrap();

        let cfg = CoreConfig::new(Some(dir.path().to_path_buf())).unwrap();
        let store = FixtureStore::from_config(&cfg).unwrap();
        assert!(!store.list(CommunicationKind::Email).is_empty());
        assert!(store.list(CommunicationKind::Call).is_empty());
        assert!(!store.encounter().has_patient());
    }

    #[test]
    fn reports_malformed_fixture_by_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(EMAILS_FIXTURE), "{ not json").unwrap();

        let err = FixtureStore::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::FixtureParse { ref name, .. } if name == EMAILS_FIXTURE));
    }

    #[test]
    fn reports_missing_fixture_file() {
        let dir = TempDir::new().unwrap();
        let err = FixtureStore::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::FixtureRead { .. }));
    }
}
