use anyhow::{Context, Result};
use hangman::HangmanError;
use hangman::cli::{
    Cli, CliInterface, CliPrompter, PlayerKind, ask_player_kind, build_guesser, build_referee,
    parse_cli,
};
use hangman::game_state::{GameInterface, Role, game_loop};
use hangman::logging::init_logging;
use hangman::player::Prompter;
use hangman::tui::TuiInterface;
use hangman::wordbank::{DictionarySource, resolve_dictionary};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

fn main() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose, cli.tui);

    let (dictionary, source) = resolve_dictionary(cli.dictionary_path.as_deref())
        .context("failed to load the dictionary")?;
    let banner = match &source {
        DictionarySource::File(path) => {
            format!("Loaded {} words from {}.", dictionary.len(), path.display())
        }
        DictionarySource::Embedded => format!("Loaded {} built-in words.", dictionary.len()),
    };

    if cli.tui {
        let tui = Rc::new(RefCell::new(
            TuiInterface::new().context("failed to start the terminal UI")?,
        ));
        let prompter: Rc<RefCell<dyn Prompter>> = tui.clone();
        let mut interface = Rc::clone(&tui);
        interface.display_message(&banner);
        if play(&cli, &dictionary, prompter, &mut interface)? {
            tui.borrow_mut().wait_for_exit()?;
        }
    } else {
        let prompter: Rc<RefCell<dyn Prompter>> =
            Rc::new(RefCell::new(CliPrompter::new(io::stdin().lock())));
        let mut interface = CliInterface::new(!cli.no_clear);
        interface.display_message(&banner);
        play(&cli, &dictionary, prompter, &mut interface)?;
    }
    Ok(())
}

/// Runs one game. Returns `false` if the players closed input before the end.
fn play(
    cli: &Cli,
    dictionary: &[String],
    prompter: Rc<RefCell<dyn Prompter>>,
    interface: &mut dyn GameInterface,
) -> Result<bool> {
    let mut asker = Rc::clone(&prompter);
    let Some(guesser_kind) = choose_player(cli.guesser, &mut asker, Role::Guesser)? else {
        return Ok(false);
    };
    let Some(referee_kind) = choose_player(cli.referee, &mut asker, Role::Referee)? else {
        return Ok(false);
    };

    let mut guesser = build_guesser(guesser_kind, dictionary, Rc::clone(&prompter));
    let mut referee = build_referee(referee_kind, dictionary, cli.seed, prompter);

    match game_loop(guesser.as_mut(), referee.as_mut(), cli.turns, interface) {
        Ok(_) => Ok(true),
        Err(HangmanError::InputClosed) => {
            interface.display_message("Exiting.");
            Ok(false)
        }
        Err(e) => Err(e).context("game aborted"),
    }
}

fn choose_player(
    preset: Option<PlayerKind>,
    prompter: &mut Rc<RefCell<dyn Prompter>>,
    role: Role,
) -> io::Result<Option<PlayerKind>> {
    match preset {
        Some(kind) => Ok(Some(kind)),
        None => ask_player_kind(prompter, role),
    }
}
