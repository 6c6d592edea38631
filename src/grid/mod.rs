//! Grid storage: the playing field and its vacancy index.

pub mod field;

pub use field::Field;
