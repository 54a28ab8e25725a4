// Output generation module

pub mod notes;
pub mod templates;

pub use notes::*;
pub use templates::*;
