//! Self-registering machine catalog.
//!
//! There is no central machine table: a machine module drops a
//! [`MachineSpec`] literal into the `inventory` collection at link time,
//! and the front-end walks the collected specs to list what exists and
//! to turn a CLI name into a factory call.

use ember_core::core::machine::Machine;

use crate::rom_loader::{RomImage, RomLoadError};

/// Factory signature every registered machine provides: ROM image in,
/// boxed machine out.
pub type BuildFn = fn(&RomImage) -> Result<Box<dyn Machine>, RomLoadError>;

/// One registered machine.
pub struct MachineSpec {
    /// Name used to select the machine on the command line.
    pub name: &'static str,
    /// Filename of the ROM image the machine boots from, used to build
    /// the default ROM path.
    pub rom_file: &'static str,
    /// Construct the machine from a loaded ROM image.
    pub build: BuildFn,
}

inventory::collect!(MachineSpec);

/// Every registered machine, in name order.
pub fn available() -> Vec<&'static MachineSpec> {
    let mut specs: Vec<&'static MachineSpec> = Vec::new();
    for spec in inventory::iter::<MachineSpec> {
        specs.push(spec);
    }
    specs.sort_unstable_by_key(|spec| spec.name);
    specs
}

/// Resolve a command-line name to its spec.
pub fn lookup(name: &str) -> Option<&'static MachineSpec> {
    for spec in inventory::iter::<MachineSpec> {
        if spec.name == name {
            return Some(spec);
        }
    }
    None
}
