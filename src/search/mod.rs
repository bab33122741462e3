pub mod coordinator;
pub mod mode;
pub mod node;
pub mod search;
pub mod tree;

pub use coordinator::*;
pub use mode::*;
pub use node::*;
pub use search::*;
pub use tree::*;

#[cfg(test)]
mod tests;
