// Domain layer: report model and ports. No network or config dependencies.

pub mod model;
pub mod ports;
