mod blob;
mod float64;

pub use blob::Blob;
pub use float64::Float64;
