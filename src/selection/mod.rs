pub mod grammar;

pub use grammar::{PageRange, Selection, SelectionError, SelectionGrammar};
