// Domain layer: models and ports. No HTTP client types leak in here.

pub mod model;
pub mod ports;
