pub mod crud;
pub mod export;

pub use crud::*;
pub use export::*;
