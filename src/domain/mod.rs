// Domain layer: reservation models and ports. Adapters live under `adapters`.

pub mod model;
pub mod ports;
