//! Boundary with the `pactl` audio control utility: card data model and the
//! process-invoking gateway.

pub mod gateway;
pub mod model;
