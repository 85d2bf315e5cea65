//! Board commands

mod load;

pub use load::LoadBoard;
