#[macro_use]
pub mod enums;

pub mod booking;
pub mod car;
pub mod catalog;
pub mod contact;
pub mod customer;
pub mod payment;

pub use enums::*;
pub use booking::*;
pub use car::*;
pub use catalog::*;
pub use contact::*;
pub use customer::*;
pub use payment::*;
