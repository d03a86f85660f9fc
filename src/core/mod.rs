pub mod config;
pub mod flatten;
pub mod list;
pub mod traverse;
pub mod types;
pub mod validate;
pub mod worklist;
