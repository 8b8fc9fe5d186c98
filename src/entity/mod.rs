//! SeaORM entity definitions.
//!
//! Hierarchy: project → plan → version → test_case → execution → evidence.

pub mod evidence;
pub mod execution;
pub mod plan;
pub mod project;
pub mod test_case;
pub mod version;
