// Member domain module
// Entity, read models, and dynamic query inputs

#![allow(clippy::module_inception)]

pub mod example;
pub mod member;
pub mod projections;
pub mod spec;

// Re-export main types for convenience
pub use example::MemberExample;
pub use member::Member;
pub use projections::{MemberSummary, MemberWithTeam};
pub use spec::MemberSpec;
