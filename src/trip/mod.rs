//! Materialises edge sequences into geographic point sequences.

#[doc(hidden)]
pub mod entity;

#[doc(inline)]
pub use entity::Trip;
