// Domain layer: records, transfer representations and repository ports.

pub mod dto;
pub mod fields;
pub mod model;
pub mod ports;
