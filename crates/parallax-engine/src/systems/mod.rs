pub mod constraint;
pub mod projector;
pub mod propagation;
#[cfg(feature = "vectors")]
pub mod vector;
