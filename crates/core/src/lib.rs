pub mod classification;
pub mod config;
pub mod error;
pub mod evidence;
pub mod theory;

pub use classification::*;
pub use config::Config;
pub use error::*;
pub use evidence::*;
pub use theory::*;
