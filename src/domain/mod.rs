// Domain layer: slicing models and the codec port. No process or filesystem access here.

pub mod model;
pub mod ports;
