use crate::config::Settings;
use crate::engine::output::Output;
use crate::world;

/// Startup text: banner, then the optional narrative sections.
pub fn render_intro(out: &mut Output, world: &world::World, settings: &Settings) {
    out.say(settings.banner.clone());

    if settings.show_events {
        render_events(out, &world.events);
    }
    if settings.show_characters {
        render_characters(out, &world.characters);
    }
}

fn render_events(out: &mut Output, events: &[world::Event]) {
    for event in events {
        out.event(event.desc.clone());
        for choice in &event.choices {
            let mut line = format!("  [{}] {}", choice.id, choice.desc);
            if !choice.outcome.is_empty() {
                line.push_str(" -> ");
                line.push_str(&choice.outcome);
            }
            out.event(line);
        }
    }
}

fn render_characters(out: &mut Output, characters: &[world::Character]) {
    for ch in characters {
        if ch.desc.is_empty() {
            out.event(ch.name.clone());
        } else {
            out.event(format!("{}: {}", ch.name, ch.desc));
        }
        out.event(format!("  Health: {}", ch.health));
        if ch.inventory.is_empty() {
            out.event("  Inventory: (empty)");
        } else {
            out.event(format!("  Inventory: {}", ch.inventory.join(", ")));
        }
    }
}
