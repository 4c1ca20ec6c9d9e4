//! Shared batch types.

mod call;
pub use call::*;

mod contracts;
pub use contracts::*;

mod item;
pub use item::*;

mod request;
pub use request::*;
