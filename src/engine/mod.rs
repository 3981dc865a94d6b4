mod intro;
mod movement;
mod output;
mod render;

pub use intro::render_intro;
pub use movement::find_exit;
pub use output::{Output, OutputBlock};
pub use render::render_room;
