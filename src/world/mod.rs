mod loader;
mod model;
mod validator;

pub use loader::{load_world_from_file, load_world_from_str};

pub use model::{Character, Choice, Event, Exit, Item, Room, World};
pub use validator::{ValidationError, validate_world};
