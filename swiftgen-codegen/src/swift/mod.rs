//! Swift code generation modules.

pub mod classes;
pub mod enums;
pub mod members;
pub mod types;
pub mod visibility;

pub use classes::ClassRenderer;
pub use enums::EnumRenderer;
pub use members::{MemberRenderer, MethodStyle};
pub use types::TypeMapper;
pub use visibility::{Classified, Member, classify};
