pub mod identity;
pub mod kind;
pub mod text;

pub use identity::{collection_name, point_id};
pub use kind::SourceKind;
