//! Vanilla block family definitions.

use crate::registry::{BlockRegistry, RegistryError};

mod corals;
mod crystals;
mod ice;
mod leaves;
mod minerals;
mod ores;
mod plants;
mod rocks;
mod sculk;
mod shrooms;
mod soil;
mod trees;

pub(crate) fn register_all(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    ores::register(reg)?;
    minerals::register(reg)?;
    crystals::register(reg)?;
    leaves::register(reg)?;
    trees::register(reg)?;
    shrooms::register(reg)?;
    ice::register(reg)?;
    sculk::register(reg)?;
    plants::register(reg)?;
    rocks::register(reg)?;
    soil::register(reg)?;
    corals::register(reg)?;
    Ok(())
}
