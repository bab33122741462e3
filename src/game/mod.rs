pub mod config;
pub mod event;
pub mod game;
pub mod player;
pub mod view;

pub use config::*;
pub use event::*;
pub use game::*;
pub use player::*;
pub use view::*;
