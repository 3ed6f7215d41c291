use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use choreboard_application::BoardUseCase;
use choreboard_core::editing::EditingFlag;
use choreboard_core::household::{Category, HouseholdStore, Person};
use choreboard_infrastructure::load_config;

const COMMANDS: &[&str] = &[
    "board", "focus", "toggle", "add", "rm", "edit", "person", "reset", "schedule", "sync", "help",
    "quit",
];

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if !line.is_empty() && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let first = line.split_whitespace().next().unwrap_or("");
        if self.commands.iter().any(|cmd| cmd == first) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if !line.is_empty() && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn parse_category(raw: &str) -> Result<Category> {
    match raw {
        "tasks" => Ok(Category::Tasks),
        "routine" => Ok(Category::Routine),
        other => anyhow::bail!("unknown list '{}', expected 'tasks' or 'routine'", other),
    }
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a number", raw))
}

fn render_list(person: &Person, category: &Category, label: &str) {
    let header = format!("  {} ({})", label, person.list(category).len());
    if person.is_complete(category) {
        println!("{}", format!("{header} done!").green());
    } else {
        println!("{}", header.bright_black());
    }
    for (index, task) in person.list(category).iter().enumerate() {
        let mark = if task.completed { "[x]" } else { "[ ]" };
        let line = format!("    {mark} {index}. {}", task.text);
        if task.completed {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

fn render_board(board: &HouseholdStore, focus: &str) {
    println!();
    println!("{}", format!("Today's Focus: {focus}").bright_yellow().bold());
    for person in board.people() {
        println!("{}", format!("== {} ==", person.name).bold());
        render_list(person, &Category::Tasks, "Cleanup Tasks");
        render_list(person, &Category::Routine, "Daily Chores");
    }
    let stats = board.stats();
    println!(
        "{}",
        format!("{} people, {} cleanup tasks", stats.people, stats.tasks).bright_black()
    );
    println!();
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  board                           show the board");
    println!("  focus                           show today's focus");
    println!("  toggle <person> <list> <n>      check/uncheck task n");
    println!("  add <person> <list> <text...>   add a task");
    println!("  rm <person> <list> <n>          delete task n");
    println!("  edit <person> <list> <n>        reword task n (prompts)");
    println!("  person add <name> | person rm <name>");
    println!("  reset                           uncheck every box for the new week");
    println!("  schedule [<day 0-6> <label...>] show or set the weekly schedule");
    println!("  sync                            pull remote state now");
    println!("  quit                            exit");
    println!("  (lists are 'tasks' or 'routine')");
}

async fn show_board(board: &BoardUseCase, dirty: &AtomicBool) {
    // whatever was pending is on screen now
    dirty.store(false, Ordering::SeqCst);
    let snapshot = board.snapshot().await;
    let focus = board.current_focus().await;
    render_board(&snapshot, &focus);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ===== Backend Initialization =====
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", format!("Config error, using defaults: {err}").yellow());
            Default::default()
        }
    };

    let editing = Arc::new(EditingFlag::new());
    let board = BoardUseCase::from_config(&config, editing.clone()).await?;

    // background merges raise a flag instead of redrawing mid-prompt
    let dirty = Arc::new(AtomicBool::new(false));
    let dirty_flag = Arc::clone(&dirty);
    board
        .set_render_callback(Arc::new(move |_| {
            dirty_flag.store(true, Ordering::SeqCst);
        }))
        .await;

    if config.endpoint.is_some() {
        board.reconciler().start_scheduler();
    } else {
        println!(
            "{}",
            "No endpoint configured; running offline (set CHOREBOARD_ENDPOINT to sync)."
                .bright_black()
        );
    }

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Choreboard ===".bright_magenta().bold());
    println!(
        "{}",
        "Type 'board' to see the chores, 'help' for commands, or 'quit' to exit.".bright_black()
    );
    show_board(&board, &dirty).await;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if dirty.swap(false, Ordering::SeqCst) {
                    println!("{}", "(board updated in the background)".bright_black());
                }

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                if matches!(parts[0], "quit" | "exit") {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                // Ok(true) means the board changed and is re-rendered below
                let result: Result<bool> = async {
                    match parts.as_slice() {
                        ["help"] => {
                            print_help();
                            Ok(false)
                        }
                        ["board"] => {
                            show_board(&board, &dirty).await;
                            Ok(false)
                        }
                        ["focus"] => {
                            println!(
                                "{}",
                                format!("Today's Focus: {}", board.current_focus().await)
                                    .bright_yellow()
                            );
                            Ok(false)
                        }
                        ["toggle", person, list, index] => {
                            let toggle = board
                                .toggle_task(person, &parse_category(list)?, parse_index(index)?)
                                .await?;
                            if toggle.list_complete {
                                println!(
                                    "{}",
                                    format!("{person} finished the whole list!")
                                        .bright_green()
                                        .bold()
                                );
                            }
                            Ok(true)
                        }
                        ["add", person, list, text @ ..] if !text.is_empty() => {
                            board
                                .add_task(person, &parse_category(list)?, &text.join(" "))
                                .await?;
                            Ok(true)
                        }
                        ["rm", person, list, index] => {
                            board
                                .delete_task(person, &parse_category(list)?, parse_index(index)?)
                                .await?;
                            Ok(true)
                        }
                        ["edit", person, list, index] => {
                            let category = parse_category(list)?;
                            let index = parse_index(index)?;
                            // hold background merges off while the user types
                            editing.set_editing(true);
                            let entry = rl.readline("new text> ");
                            editing.set_editing(false);
                            match entry {
                                Ok(new_text) => {
                                    board.edit_task(person, &category, index, &new_text).await?;
                                    Ok(true)
                                }
                                Err(_) => {
                                    println!("{}", "Edit cancelled.".bright_black());
                                    Ok(false)
                                }
                            }
                        }
                        ["person", "add", name] => {
                            board.add_person(name).await?;
                            Ok(true)
                        }
                        ["person", "rm", name] => {
                            board.delete_person(name).await?;
                            Ok(true)
                        }
                        ["reset"] => {
                            board.reset_week().await?;
                            Ok(true)
                        }
                        ["schedule"] => {
                            let snapshot = board.snapshot().await;
                            for (day, label) in snapshot.schedule().iter() {
                                println!("  {:9} {}", DAY_NAMES[day], label);
                            }
                            Ok(false)
                        }
                        ["schedule", day, label @ ..] if !label.is_empty() => {
                            let day = parse_index(day)?;
                            let mut schedule = board.snapshot().await.schedule().clone();
                            if !schedule.set(day, label.join(" ")) {
                                anyhow::bail!("'{}' is not a day (0-6)", day);
                            }
                            board.save_schedule(schedule).await?;
                            Ok(true)
                        }
                        ["sync"] => {
                            let outcome = board.reconciler().sync_once().await?;
                            println!("{}", format!("sync: {outcome:?}").bright_black());
                            Ok(true)
                        }
                        _ => {
                            println!("{}", "Unknown command, try 'help'".bright_black());
                            Ok(false)
                        }
                    }
                }
                .await;

                match result {
                    Ok(true) => show_board(&board, &dirty).await,
                    Ok(false) => {}
                    Err(err) => eprintln!("{}", format!("Error: {err}").red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
