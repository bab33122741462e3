pub mod cards;
pub use cards::*;

pub mod draws;
pub use draws::*;

pub mod species;
pub use species::*;
