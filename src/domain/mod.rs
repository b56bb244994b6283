// Domain layer: catalog models, identifier rules and ports. Nothing here touches the filesystem.

pub mod identifier;
pub mod model;
pub mod ports;
