// Domain layer: address model and the ports adapters and configs implement.

pub mod model;
pub mod ports;
