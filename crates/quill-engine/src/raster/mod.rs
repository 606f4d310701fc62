pub mod mask;
#[cfg(feature = "vectors")]
pub mod vector;
