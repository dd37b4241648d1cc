//! Domain entities - the core business objects.

mod post;
pub mod tags;
pub mod timestamp;

pub use post::{Post, PostDraft};
