use crate::engine::output::Output;
use crate::world;

pub fn render_room(out: &mut Output, room: &world::Room, world: &world::World) {
    out.heading(room.name.clone());
    out.line(room.desc.trim());

    if room.exits.is_empty() {
        out.exits("Exits: (none)");
    } else {
        // declaration order, duplicates kept
        let list = room
            .exits
            .iter()
            .map(|e| e.direction.as_str())
            .collect::<Vec<&str>>()
            .join(", ");
        out.exits(format!("Exits: {}", list));
    }

    out.say("Items in the room:");
    let mut any = false;
    for item in world.items_in(&room.id) {
        out.item(format!("{}: {}", item.name, item.desc));
        any = true;
    }
    if !any {
        out.item("(none)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OutputBlock;
    use crate::world::load_world_from_str;

    #[test]
    fn lists_exits_in_declaration_order_and_room_items() {
        let world = load_world_from_str(
            r#"<game>
                <rooms>
                  <room id="hall">
                    <name>Hall</name>
                    <description>A long hall.</description>
                    <exits>
                      <exit direction="west" target="a"/>
                      <exit direction="east" target="b"/>
                      <exit direction="down" target="c"/>
                    </exits>
                  </room>
                </rooms>
                <items>
                  <item id="key" location="hall"><name>Key</name><description>Brass.</description></item>
                  <item id="map" location="elsewhere"><name>Map</name></item>
                  <item id="lamp" location="hall"><name>Lamp</name><description>Dim.</description></item>
                </items>
              </game>"#,
        )
        .unwrap();

        let mut out = Output::new();
        render_room(&mut out, &world.rooms[0], &world);

        assert_eq!(
            out.blocks,
            vec![
                OutputBlock::Title("Hall".to_string()),
                OutputBlock::Text("A long hall.".to_string()),
                OutputBlock::Exits("Exits: west, east, down".to_string()),
                OutputBlock::Text("Items in the room:".to_string()),
                OutputBlock::Item("Key: Brass.".to_string()),
                OutputBlock::Item("Lamp: Dim.".to_string()),
            ]
        );
    }

    #[test]
    fn empty_room_shows_placeholders() {
        let world = load_world_from_str(
            r#"<game><rooms><room id="cell"><name>Cell</name></room></rooms></game>"#,
        )
        .unwrap();

        let mut out = Output::new();
        render_room(&mut out, &world.rooms[0], &world);

        assert_eq!(
            out.blocks,
            vec![
                OutputBlock::Title("Cell".to_string()),
                OutputBlock::Text(String::new()),
                OutputBlock::Exits("Exits: (none)".to_string()),
                OutputBlock::Text("Items in the room:".to_string()),
                OutputBlock::Item("(none)".to_string()),
            ]
        );
    }
}
