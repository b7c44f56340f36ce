// Domain layer: CMS wire types, flat view models and the content-store port.

pub mod entry;
pub mod model;
pub mod ports;
