use tracing::debug;

use crate::world;

/// First exit whose direction equals `input` exactly. Case matters and the
/// target is not checked here.
pub fn find_exit<'a>(room: &'a world::Room, input: &str) -> Option<&'a world::Exit> {
    let exit = room.exits.iter().find(|e| e.direction == input);
    debug!(room = %room.id, input, matched = exit.is_some(), "exit lookup");
    exit
}
