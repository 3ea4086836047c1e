//! Platform event source adapters.

pub mod winit;
