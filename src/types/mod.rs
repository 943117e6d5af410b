// src/types/mod.rs

mod record;
mod site;
mod summary;

pub use record::*;
pub use site::*;
pub use summary::*;
