// Domain layer: identifiers, validated values, entities and ports (interfaces).

pub mod ids;
pub mod model;
pub mod ports;
pub mod values;
