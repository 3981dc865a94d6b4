//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Runtime world type used by the game loop. Read-only once loaded.
#[derive(Debug, Default)]
pub struct World {
    /// Start room declared on the document root, if any.
    pub start_room: Option<String>,
    pub rooms: Vec<Room>,
    pub items: Vec<Item>,
    pub events: Vec<Event>,
    pub characters: Vec<Character>,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub exits: Vec<Exit>,
}

#[derive(Debug, Clone)]
pub struct Exit {
    pub direction: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub location: String, // room id; empty means nowhere
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: String,
    pub desc: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub id: String,
    pub desc: String,
    pub outcome: String,
}

#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    pub desc: String,
    pub health: i32,
    pub inventory: Vec<String>,
}

impl World {
    /// First room in load order carrying `id`.
    pub fn find_room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// Items located in `room_id`, in declaration order.
    pub fn items_in<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| item.location == room_id)
    }
}
