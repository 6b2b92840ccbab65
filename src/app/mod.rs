// Presentation of lookup results; nothing here talks to the registry.

pub mod render;
