//! Binary for building contract schemas from odra modules.
#![doc = "Binary for building contract schemas from odra modules."]

#[allow(unused_imports)]
use lens_collect_modules;

fn main() {
    // Schema generation is driven by the odra-build crate
}
