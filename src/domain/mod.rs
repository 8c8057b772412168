// Domain layer: core models and ports. No AWS or CLI types in here.

pub mod model;
pub mod ports;
