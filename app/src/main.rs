mod console;
mod game;
mod settings;

use std::{path::PathBuf, process::ExitCode};

use ember_engine::core::log::ChannelLogger;

use crate::{console::Console, game::Game, settings::Settings};

fn main() -> ExitCode {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = match Settings::load_or_default(path.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    // Validated when the settings were loaded.
    let level = settings.log.level_filter().unwrap_or(log::LevelFilter::Info);
    let (logger, receiver) = ChannelLogger::with_receiver(level);
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }

    let console = Console::new(receiver, settings.log.history);
    let mut game = Game::new(settings, console);
    match game.run() {
        Ok(()) => {
            println!(
                "{} fixed updates, {} entities, {} sprites drawn in the last frame",
                game.fixed_updates(),
                game.registry().len(),
                game.canvas().draws().len()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
