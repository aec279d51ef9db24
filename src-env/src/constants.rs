/// Environment variable pointing at the project root
pub const PDTUNE_DIR_VAR: &str = "PDTUNE_DIR";

/// Directory (under the project root) holding generated artefacts
pub const DATA_GENERATED: &str = "data_generated";

/// Subdirectory of [`DATA_GENERATED`] holding optimization records
pub const RECORDS: &str = "records";
