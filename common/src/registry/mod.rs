//! Static, process-wide registries of field configurations and lifecycle
//! stages. Both are built once on first access and never change.

pub mod fields;
pub mod stages;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("stage {0} does not exist, stages are numbered 1 to 14")]
    UnknownStage(u8),
}
