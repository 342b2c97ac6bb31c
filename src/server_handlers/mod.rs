pub mod dashboard;
pub mod agenda;
pub mod docs;

pub use dashboard::*;
pub use agenda::*;
pub use docs::*;
