//! Background tasks.

mod driver;

pub use driver::TickDriver;
