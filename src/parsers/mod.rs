//! Boundary parsers for externally produced result files
//!
//! The run provider and the metadata processor are external collaborators;
//! these modules deserialize their JSON artifacts into the `data` entities.
//! The report core itself never reads files.

pub mod metadata_json;
pub mod run_json;

pub use metadata_json::load_metadata_file;
pub use run_json::load_run_file;
