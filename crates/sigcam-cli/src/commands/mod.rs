//! Command implementations.

pub mod convert;
pub mod edges;
pub mod mechanisms;

pub use self::convert::execute_convert;
pub use self::edges::execute_edges;
pub use self::mechanisms::execute_mechanisms;

use std::path::Path;

use crate::error::Result;
use sigcam_domain::MechanismMapper;
use sigcam_ingest::{bundled_mechanisms, load_mechanisms_from_path};

/// Load a mechanism table, falling back to the bundled one.
pub(crate) fn load_mapper(path: Option<&Path>) -> Result<MechanismMapper> {
    let mapper = match path {
        Some(path) => load_mechanisms_from_path(path)?,
        None => bundled_mechanisms()?,
    };
    Ok(mapper)
}
