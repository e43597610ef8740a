pub mod enums;
pub mod incident;
pub mod resident;

pub use incident::*;
pub use resident::*;
