pub mod account;
pub mod appointment;
pub mod enums;
pub mod provider;
pub mod record;

pub use account::*;
pub use appointment::*;
pub use enums::*;
pub use provider::*;
pub use record::*;
