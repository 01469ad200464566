//! Parsing infrastructure - external dependencies

pub mod java_lowering;

pub use java_lowering::JavaLowering;
