mod desc;
mod kind;
mod value;

pub use desc::TypeDesc;
pub use kind::FieldKind;
pub use value::{Value, ValueMap};
