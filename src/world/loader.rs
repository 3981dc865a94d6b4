use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::model::{Character, Choice, Event, Exit, Item, Room, World};
use crate::error::LoadError;

///////////////////
/// XML STRUCTS ///
///////////////////

// Attributes carry the `@` prefix quick-xml expects; everything else is a
// child element. Unknown elements are ignored.

#[derive(Deserialize)]
struct GameFile {
    #[serde(rename = "@start", default)]
    start: Option<String>,
    #[serde(default)]
    rooms: RoomsConfig, // <rooms><room/>...</rooms>
    #[serde(default)]
    levels: LevelsConfig, // <levels><level><rooms/></level></levels>
    #[serde(default)]
    items: ItemsConfig,
    #[serde(default)]
    events: EventsConfig,
    #[serde(default)]
    characters: CharactersConfig,
}

#[derive(Deserialize, Default)]
struct RoomsConfig {
    #[serde(default)]
    room: Vec<RoomConfig>,
}

#[derive(Deserialize, Default)]
struct LevelsConfig {
    #[serde(default)]
    level: Vec<LevelConfig>,
}

#[derive(Deserialize)]
struct LevelConfig {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(default)]
    rooms: RoomsConfig,
}

#[derive(Deserialize)]
struct RoomConfig {
    #[serde(rename = "@id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    exits: ExitsConfig,
}

#[derive(Deserialize, Default)]
struct ExitsConfig {
    #[serde(default)]
    exit: Vec<ExitConfig>,
}

#[derive(Deserialize)]
struct ExitConfig {
    #[serde(rename = "@direction")]
    direction: String,
    #[serde(rename = "@target")]
    target: String,
}

#[derive(Deserialize, Default)]
struct ItemsConfig {
    #[serde(default)]
    item: Vec<ItemConfig>,
}

#[derive(Deserialize)]
struct ItemConfig {
    #[serde(rename = "@id")]
    id: String,
    /// Room id the item sits in.
    #[serde(rename = "@location", default)]
    location: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Default)]
struct EventsConfig {
    #[serde(default)]
    event: Vec<EventConfig>,
}

#[derive(Deserialize)]
struct EventConfig {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    choices: ChoicesConfig,
}

#[derive(Deserialize, Default)]
struct ChoicesConfig {
    #[serde(default)]
    choice: Vec<ChoiceConfig>,
}

#[derive(Deserialize)]
struct ChoiceConfig {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    outcome: String,
}

#[derive(Deserialize, Default)]
struct CharactersConfig {
    #[serde(default)]
    character: Vec<CharacterConfig>,
}

#[derive(Deserialize)]
struct CharacterConfig {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "blank_as_zero")]
    health: i32,
    #[serde(default)]
    inventory: InventoryConfig,
}

#[derive(Deserialize, Default)]
struct InventoryConfig {
    #[serde(default)]
    item: Vec<String>,
}

// `<health/>` reads as 0; anything else must be a number.
fn blank_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(serde::de::Error::custom)
}

////////////////////////////
/// XML PARSER FUNCTIONS ///
////////////////////////////

/// Public API: load a world from an .xml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let world = load_world_from_str(&contents)?;
    info!(
        path = %path.display(),
        rooms = world.rooms.len(),
        items = world.items.len(),
        "world loaded"
    );
    Ok(world)
}

/// Parse a world document held in memory.
pub fn load_world_from_str(xml: &str) -> Result<World, LoadError> {
    let game_file: GameFile = quick_xml::de::from_str(xml)?;

    let start_room = game_file
        .start
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    // Top-level rooms first, then each level's rooms in order.
    let mut room_cfgs = game_file.rooms.room;
    for level in game_file.levels.level {
        debug!(level = %level.id, rooms = level.rooms.room.len(), "flattening level");
        room_cfgs.extend(level.rooms.room);
    }

    let mut rooms = Vec::with_capacity(room_cfgs.len());
    for rc in room_cfgs {
        let id = rc.id.trim().to_string();
        if id.is_empty() {
            return Err(LoadError::Invalid("room id may not be empty".to_string()));
        }

        let exits = rc
            .exits
            .exit
            .into_iter()
            .map(|e| Exit {
                direction: e.direction.trim().to_string(),
                target: e.target.trim().to_string(),
            })
            .collect();

        rooms.push(Room {
            id,
            name: normalize_text(&rc.name),
            desc: normalize_text(&rc.description),
            exits,
        });
    }

    let items = game_file
        .items
        .item
        .into_iter()
        .map(|ic| Item {
            id: ic.id.trim().to_string(),
            name: normalize_text(&ic.name),
            desc: normalize_text(&ic.description),
            location: ic.location.trim().to_string(),
        })
        .collect();

    let events = game_file
        .events
        .event
        .into_iter()
        .map(|ec| Event {
            id: ec.id.trim().to_string(),
            desc: normalize_text(&ec.description),
            choices: ec
                .choices
                .choice
                .into_iter()
                .map(|cc| Choice {
                    id: cc.id.trim().to_string(),
                    desc: normalize_text(&cc.description),
                    outcome: normalize_text(&cc.outcome),
                })
                .collect(),
        })
        .collect();

    let characters = game_file
        .characters
        .character
        .into_iter()
        .map(|cc| Character {
            name: normalize_text(&cc.name),
            desc: normalize_text(&cc.description),
            health: cc.health,
            inventory: cc
                .inventory
                .item
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
        .collect();

    Ok(World {
        start_room,
        rooms,
        items,
        events,
        characters,
    })
}

/// Collapse document indentation: wrapped lines join with a space, one blank
/// line keeps a newline, two or more keep a paragraph break.
fn normalize_text(raw: &str) -> String {
    let mut result = String::new();
    let mut blanks = 0usize;

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            blanks += 1;
            continue;
        }

        if !result.is_empty() {
            result.push_str(match blanks {
                0 => " ",
                1 => "\n",
                _ => "\n\n",
            });
        }
        result.push_str(line);
        blanks = 0;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
<game>
  <rooms>
    <room id="start">
      <name>Airlock</name>
      <description>
        A cramped airlock.
        Frost rimes the inner hatch.
      </description>
      <exits>
        <exit direction="north" target="hall"/>
        <exit direction="up" target="roof"/>
      </exits>
    </room>
    <room id="hall">
      <name>Hall</name>
      <description>A long hall.</description>
      <exits>
        <exit direction="south" target="start"/>
      </exits>
    </room>
  </rooms>
  <items>
    <item id="key" location="hall">
      <name>Key</name>
      <description>A brass key.</description>
    </item>
    <item id="card" location="start">
      <name>Keycard</name>
    </item>
  </items>
</game>
"#;

    #[test]
    fn loads_rooms_exits_and_items_in_order() {
        let world = load_world_from_str(SAMPLE).unwrap();

        assert_eq!(world.start_room, None);
        assert_eq!(world.rooms.len(), 2);

        let start = &world.rooms[0];
        assert_eq!(start.id, "start");
        assert_eq!(start.name, "Airlock");
        assert_eq!(start.desc, "A cramped airlock. Frost rimes the inner hatch.");
        let dirs: Vec<&str> = start.exits.iter().map(|e| e.direction.as_str()).collect();
        assert_eq!(dirs, vec!["north", "up"]);
        assert_eq!(start.exits[0].target, "hall");

        assert_eq!(world.items.len(), 2);
        assert_eq!(world.items[0].id, "key");
        assert_eq!(world.items[0].location, "hall");
        assert_eq!(world.items[0].desc, "A brass key.");
        // missing optional description defaults to empty
        assert_eq!(world.items[1].desc, "");
        assert!(world.events.is_empty());
        assert!(world.characters.is_empty());
    }

    #[test]
    fn unresolved_exit_targets_are_not_rejected() {
        // "roof" does not exist; the loader leaves that to the validator
        let world = load_world_from_str(SAMPLE).unwrap();
        assert!(world.find_room("roof").is_none());
    }

    #[test]
    fn flattens_levels_after_top_level_rooms() {
        let xml = r#"
<game start="deck">
  <rooms>
    <room id="deck"><name>Deck</name></room>
  </rooms>
  <levels>
    <level id="one">
      <rooms>
        <room id="l1a"><name>A</name></room>
        <room id="l1b"><name>B</name></room>
      </rooms>
    </level>
    <level id="two">
      <rooms><room id="l2a"><name>C</name></room></rooms>
    </level>
  </levels>
</game>
"#;
        let world = load_world_from_str(xml).unwrap();
        let ids: Vec<&str> = world.rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["deck", "l1a", "l1b", "l2a"]);
        assert_eq!(world.start_room.as_deref(), Some("deck"));
    }

    #[test]
    fn loads_events_and_characters() {
        let xml = r#"
<game>
  <rooms><room id="start"><name>Shore</name></room></rooms>
  <events>
    <event id="storm">
      <description>A storm rolls in.</description>
      <choices>
        <choice id="shelter">
          <description>Seek shelter</description>
          <outcome>You stay dry.</outcome>
        </choice>
        <choice id="swim"><description>Swim</description></choice>
      </choices>
    </event>
  </events>
  <characters>
    <character>
      <name>Diver</name>
      <description>A tired diver.</description>
      <health>80</health>
      <inventory><item>Rope</item><item>Knife</item></inventory>
    </character>
    <character><name>Gull</name></character>
  </characters>
</game>
"#;
        let world = load_world_from_str(xml).unwrap();

        assert_eq!(world.events.len(), 1);
        let storm = &world.events[0];
        assert_eq!(storm.desc, "A storm rolls in.");
        assert_eq!(storm.choices.len(), 2);
        assert_eq!(storm.choices[0].outcome, "You stay dry.");
        assert_eq!(storm.choices[1].outcome, "");

        assert_eq!(world.characters.len(), 2);
        assert_eq!(world.characters[0].health, 80);
        assert_eq!(world.characters[0].inventory, vec!["Rope", "Knife"]);
        assert_eq!(world.characters[1].health, 0);
        assert!(world.characters[1].inventory.is_empty());
    }

    #[test]
    fn blank_health_defaults_to_zero() {
        let xml = r#"
<game>
  <rooms><room id="start"/></rooms>
  <characters>
    <character><name>X</name><health/></character>
    <character><name>Y</name><health>  </health></character>
    <character><name>Z</name><health> 7 </health></character>
  </characters>
</game>
"#;
        let world = load_world_from_str(xml).unwrap();
        let health: Vec<i32> = world.characters.iter().map(|c| c.health).collect();
        assert_eq!(health, vec![0, 0, 7]);
    }

    #[test]
    fn non_numeric_health_is_a_parse_error() {
        let xml = r#"<game><characters><character><health>lots</health></character></characters></game>"#;
        assert!(matches!(load_world_from_str(xml), Err(LoadError::Parse(_))));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = load_world_from_str("<game><rooms><room id=\"a\">").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert_eq!(err.user_prefix(), "Error parsing game data:");
    }

    #[test]
    fn missing_exit_target_attribute_is_a_parse_error() {
        let xml = r#"<game><rooms><room id="a"><exits><exit direction="n"/></exits></room></rooms></game>"#;
        assert!(matches!(load_world_from_str(xml), Err(LoadError::Parse(_))));
    }

    #[test]
    fn empty_room_id_is_rejected() {
        let xml = r#"<game><rooms><room id="  "><name>Void</name></room></rooms></game>"#;
        assert!(matches!(load_world_from_str(xml), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_world_from_file(&dir.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert_eq!(err.user_prefix(), "Error reading game data:");
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let world = load_world_from_file(file.path()).unwrap();
        assert_eq!(world.rooms.len(), 2);
    }

    #[test]
    fn normalize_text_keeps_paragraphs() {
        let raw = "\n  first line\n  wrapped\n\n  second\n\n\n  third\n";
        assert_eq!(normalize_text(raw), "first line wrapped\nsecond\n\nthird");
        assert_eq!(normalize_text("   "), "");
    }
}
