//! Constants used throughout the Careflow core crate.
//!
//! File names and environment variable names live here so the binaries and the
//! fixture loader agree on them.

/// Environment variable naming a directory that overrides the embedded fixtures.
pub const FIXTURES_DIR_ENV: &str = "CAREFLOW_FIXTURES_DIR";

/// Environment variable for the REST preview listen address.
pub const REST_ADDR_ENV: &str = "CAREFLOW_REST_ADDR";

/// Default REST preview listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Fixture file holding mock email records.
pub const EMAILS_FIXTURE: &str = "emails.json";

/// Fixture file holding mock fax records.
pub const FAXES_FIXTURE: &str = "faxes.json";

/// Fixture file holding mock SMS conversations.
pub const SMS_FIXTURE: &str = "sms.json";

/// Fixture file holding mock call records.
pub const CALLS_FIXTURE: &str = "calls.json";

/// Fixture file holding the sample scribe encounter.
pub const ENCOUNTER_FIXTURE: &str = "encounter.json";
