pub mod error;
pub mod home;
pub mod observations;
pub mod temperature;

pub use error::*;
pub use home::*;
pub use observations::*;
pub use temperature::*;
