// Domain layer: gateway inventory models and the ports the step is wired through.

pub mod model;
pub mod ports;
