// Domain layer: document model and ports (interfaces).

pub mod model;
pub mod ports;
