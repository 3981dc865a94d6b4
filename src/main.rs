use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use xml_adventure::{GameState, Settings, load_checked, run};

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout belongs to the game.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let world_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.world_path.clone());

    let world = match load_checked(&world_path, &settings) {
        Ok(w) => {
            info!(path = %world_path.display(), "using world file");
            w
        }
        Err(e) => {
            // reported on stdout; no session, status 0
            println!("{} {e}", e.user_prefix());
            return ExitCode::SUCCESS;
        }
    };

    let mut state = GameState::new(world, settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&mut state, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(status) => status.into(),
        Err(e) => {
            error!(%e, "terminal i/o failed");
            ExitCode::FAILURE
        }
    }
}
