use std::collections::HashSet;

use super::model::World;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Referential checks the loader does not enforce. An empty result means the
/// world can be played without ever hitting the room-not-found path.
pub fn validate_world(world: &World, start_room: &str) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.rooms.is_empty() {
        errors.push(ValidationError::new("world has no rooms"));
    }

    let mut room_ids: HashSet<&str> = HashSet::new();
    for room in &world.rooms {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(format!(
                "duplicate room id '{}' (first one wins)",
                room.id
            )));
        }
    }

    if !room_ids.contains(start_room) {
        errors.push(ValidationError::new(format!(
            "start room '{}' not found among rooms",
            start_room
        )));
    }

    for room in &world.rooms {
        for exit in &room.exits {
            if !room_ids.contains(exit.target.as_str()) {
                errors.push(ValidationError::new(format!(
                    "room '{}' exit '{}' targets missing room '{}'",
                    room.id, exit.direction, exit.target
                )));
            }
        }
    }

    let mut item_ids: HashSet<&str> = HashSet::new();
    for item in &world.items {
        if !item_ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(format!(
                "duplicate item id '{}'",
                item.id
            )));
        }

        if !item.location.is_empty() && !room_ids.contains(item.location.as_str()) {
            errors.push(ValidationError::new(format!(
                "item '{}' location '{}' not found among rooms",
                item.id, item.location
            )));
        }
    }

    errors
}
