pub mod config;
pub mod engine;
pub mod error;
pub mod world;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, error, warn};

use engine::{Output, find_exit, render_intro, render_room};
use world::{Room, World, validate_world};

pub use config::Settings;
pub use error::{ConfigError, LoadError, NavigationError};
pub use world::{load_world_from_file, load_world_from_str};

pub const PROMPT: &str = "Enter a direction to move or 'quit' to exit: ";
pub const NO_EXIT_TEXT: &str = "You can't go that way.";
pub const ROOM_NOT_FOUND_TEXT: &str = "Error: Current room not found.";

/// How a finished session should leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Terminated(Status),
}

pub struct GameState {
    pub world: World,
    pub settings: Settings,
    pub current_room_id: String,
    pub phase: Phase,
    /// Whether the intro and first description went out through `opening`.
    pub opened: bool,
}

/// Load a world file and apply the validation policy from `settings`.
pub fn load_checked(path: &Path, settings: &Settings) -> Result<World, LoadError> {
    let world = load_world_from_file(path)?;
    check_world(world, settings)
}

/// Warn about validation issues, or reject the world under
/// `strict_validation`.
pub fn check_world(world: World, settings: &Settings) -> Result<World, LoadError> {
    let start = settings.resolve_start_room(world.start_room.as_deref());
    let issues = validate_world(&world, &start);

    if issues.is_empty() {
        return Ok(world);
    }

    if settings.strict_validation {
        let joined = issues
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<&str>>()
            .join("; ");
        return Err(LoadError::Invalid(joined));
    }

    for issue in &issues {
        warn!(%issue, "world validation");
    }
    Ok(world)
}

impl GameState {
    pub fn new(world: World, settings: Settings) -> Self {
        let current_room_id = settings.resolve_start_room(world.start_room.as_deref());

        GameState {
            world,
            settings,
            current_room_id,
            phase: Phase::Playing,
            opened: false,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }

    pub fn current_room(&self) -> Result<&Room, NavigationError> {
        self.world
            .find_room(&self.current_room_id)
            .ok_or_else(|| NavigationError::RoomNotFound(self.current_room_id.clone()))
    }

    /// Banner plus events and characters, as enabled in the settings.
    pub fn intro(&self) -> Output {
        let mut out = Output::new();
        render_intro(&mut out, &self.world, &self.settings);
        out
    }

    /// Resolve the cursor and describe the room. A cursor that resolves to
    /// nothing ends the session with a failure status.
    pub fn describe(&mut self) -> Result<Output, NavigationError> {
        let mut out = Output::new();
        if self.is_terminated() {
            return Ok(out);
        }

        match self.current_room() {
            Ok(room) => {
                render_room(&mut out, room, &self.world);
                Ok(out)
            }
            Err(e) => {
                self.phase = Phase::Terminated(Status::Failure);
                Err(e)
            }
        }
    }

    /// Apply one line of player input. Only the first token counts.
    pub fn step(&mut self, input: &str) -> Output {
        let mut out = Output::new();
        if self.is_terminated() {
            return out;
        }

        let command = input.split_whitespace().next().unwrap_or("");

        if self.settings.is_quit(command) {
            out.say(self.settings.farewell.clone());
            self.phase = Phase::Terminated(Status::Success);
            return out;
        }

        let target = self
            .world
            .find_room(&self.current_room_id)
            .and_then(|room| find_exit(room, command))
            .map(|exit| exit.target.clone())
            .filter(|target| !target.is_empty());

        match target {
            Some(target) => {
                debug!(from = %self.current_room_id, to = %target, "moved");
                self.current_room_id = target;
            }
            None => out.say(NO_EXIT_TEXT),
        }

        out
    }

    /// Intro and first room description for callers without a terminal.
    /// The flag is `true` once the session is over.
    pub fn opening(&mut self) -> (Output, bool) {
        self.opened = true;
        let mut out = self.intro();
        let quit = self.append_description(&mut out);
        (out, quit)
    }

    /// One command plus the description that follows it. The opening is
    /// prepended if it has not been shown yet.
    pub fn turn(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        if !self.opened {
            let (opening, quit) = self.opening();
            out.blocks.extend(opening.blocks);
            if quit {
                return (out, true);
            }
        }

        out.blocks.extend(self.step(input).blocks);
        let quit = self.append_description(&mut out);
        (out, quit)
    }

    fn append_description(&mut self, out: &mut Output) -> bool {
        if self.is_terminated() {
            return true;
        }
        match self.describe() {
            Ok(desc) => {
                out.blocks.extend(desc.blocks);
                false
            }
            Err(e) => {
                error!(%e, "navigation failed");
                out.say(ROOM_NOT_FOUND_TEXT);
                true
            }
        }
    }

    /// Input ran out; treated like a quit.
    pub fn end_of_input(&mut self) -> Output {
        let mut out = Output::new();
        if !self.is_terminated() {
            out.say(self.settings.farewell.clone());
            self.phase = Phase::Terminated(Status::Success);
        }
        out
    }
}

/// Drive a session until the player quits, input ends, or the cursor points
/// at an unknown room.
pub fn run<R: BufRead, W: Write>(
    state: &mut GameState,
    input: &mut R,
    output: &mut W,
) -> io::Result<Status> {
    state.intro().write_to(output)?;
    state.opened = true;

    let mut line = String::new();

    loop {
        match state.describe() {
            Ok(out) => out.write_to(output)?,
            Err(e) => {
                error!(%e, "navigation failed");
                writeln!(output, "{}", ROOM_NOT_FOUND_TEXT)?;
                output.flush()?;
                return Ok(Status::Failure);
            }
        }

        write!(output, "\n{}", PROMPT)?;
        output.flush()?;

        line.clear();
        let out = if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            state.end_of_input()
        } else {
            state.step(&line)
        };
        out.write_to(output)?;
        output.flush()?;

        if let Phase::Terminated(status) = state.phase {
            return Ok(status);
        }
    }
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        quit: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from an XML world string. Call `init()` to get the intro.
        #[wasm_bindgen(constructor)]
        pub fn new(world_xml: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_xml).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world, Settings::default()),
            })
        }

        /// Intro plus the first room description.
        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            let (out, quit) = self.state.opening();
            to_js(out, quit)
        }

        /// Process a player command and return the resulting output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            let (out, quit) = self.state.turn(input);
            to_js(out, quit)
        }
    }

    fn to_js(out: Output, quit: bool) -> JsValue {
        to_value(&WasmStepResult {
            blocks: out.blocks,
            quit,
        })
        .unwrap_or(JsValue::NULL)
    }
}
