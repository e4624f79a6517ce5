// Library exports for testing and potential library use

pub mod cli;
pub mod debug;

/// Configuration system re-exported from the spin-config crate.
pub use spin_config as config;
