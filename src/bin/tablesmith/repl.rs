//! REPL mode for editing a schema interactively.

use std::sync::{Arc, Mutex};

use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tablesmith::prelude::*;

use crate::{print_tables, read_schema, render, write_output};

/// Run the interactive editing session.
pub async fn run_repl(config: &Config, client: &SqlGeneratorClient) {
    println!("{}", "🧱 tablesmith REPL (interactive mode)".cyan().bold());
    println!(
        "{}",
        "Type table lines (`table users:`, `- id(entier, clé primaire)`). Commands:".dimmed()
    );
    show_repl_help();

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("{} {}", "Failed to initialize REPL:".red(), e);
            return;
        }
    };

    let history_path = dirs::home_dir()
        .map(|p| p.join(".tablesmith_history"))
        .unwrap_or_default();
    let _ = rl.load_history(&history_path);

    let mut session = EditSession::new(HistoryManager::with_capacity(config.history.capacity));
    let flags = Arc::new(Mutex::new(session.history().flags()));
    let sink = Arc::clone(&flags);
    session.history_mut().subscribe(move |f| {
        if let Ok(mut current) = sink.lock() {
            *current = f;
        }
    });

    let mut dialect = config.generate.dialect;

    loop {
        let prompt = match flags.lock().map(|f| *f) {
            Ok(HistoryFlags { can_undo, can_redo }) => format!(
                "tablesmith{}{}> ",
                if can_undo { " ↶" } else { "" },
                if can_redo { " ↷" } else { "" }
            ),
            Err(_) => "tablesmith> ".to_string(),
        };

        match rl.readline(&prompt.cyan().bold().to_string()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if !line.starts_with('.') {
                    apply_line(&mut session, line);
                    continue;
                }

                let mut parts = line.splitn(2, char::is_whitespace);
                let command = parts.next().unwrap_or_default();
                let arg = parts.next().map(str::trim).unwrap_or_default();

                match command {
                    ".exit" | ".quit" => {
                        println!("{}", "Goodbye! 👋".green());
                        break;
                    }
                    ".help" => show_repl_help(),
                    ".show" => print_tables(session.tables()),
                    ".undo" => {
                        if session.undo() {
                            println!("{} undone", "↶".green());
                        } else {
                            println!("{}", "Nothing to undo".dimmed());
                        }
                    }
                    ".redo" => {
                        if session.redo() {
                            println!("{} redone", "↷".green());
                        } else {
                            println!("{}", "Nothing to redo".dimmed());
                        }
                    }
                    ".dialect" => match Dialect::from_name(arg) {
                        Some(d) => {
                            dialect = d;
                            println!("{} dialect set to {}", "✓".green(), d.to_string().cyan());
                        }
                        None => println!("Current dialect: {}", dialect.to_string().cyan()),
                    },
                    ".export" => export(&session, arg, client, dialect).await,
                    ".generate" => {
                        let target = Dialect::from_name(arg).unwrap_or(dialect);
                        emit(&session, ExportFormat::Sql, None, client, target).await;
                    }
                    ".template" => add_template(&mut session, arg),
                    ".drop" => drop_target(&mut session, arg),
                    ".load" => match read_schema(arg) {
                        Ok(tables) => {
                            let count = tables.len();
                            session.load(tables);
                            println!("{} loaded {} table(s)", "✓".green(), count);
                        }
                        Err(e) => eprintln!("{} {}", "✗".red(), e.to_string().red()),
                    },
                    ".save" => {
                        let path = if arg.is_empty() {
                            ExportFormat::Json.default_file_name()
                        } else {
                            arg
                        };
                        let json = ExportFormat::Json.render(session.tables()).unwrap_or_default();
                        if let Err(e) = write_output(Some(path), &json) {
                            eprintln!("{} {}", "✗".red(), e.to_string().red());
                        }
                    }
                    ".reset" => {
                        session.load(Vec::new());
                        println!("{} schema cleared (undo to restore)", "✓".green());
                    }
                    ".clear" => print!("\x1B[2J\x1B[1;1H"),
                    _ => eprintln!("{} unknown command {}", "✗".red(), command.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye! 👋".green());
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Error:".red(), err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
}

fn apply_line(session: &mut EditSession, line: &str) {
    match session.apply_line(line) {
        LineOutcome::TableOpened(name) => println!("{} table {}", "+".green(), name.white().bold()),
        LineOutcome::ColumnAdded { table, column } => {
            println!("{} {}.{}", "+".green(), table, column.white().bold())
        }
        LineOutcome::Ignored if line.starts_with('-') && session.tables().is_empty() => {
            println!("{}", "Ignored: start a table first (`table <name>`)".dimmed())
        }
        LineOutcome::Ignored => {
            println!("{}", "Ignored: expected `table <name>` or `- col(type, ...)`".dimmed())
        }
    }
}

/// `.export <format> [file]`
async fn export(session: &EditSession, arg: &str, client: &SqlGeneratorClient, dialect: Dialect) {
    let mut parts = arg.split_whitespace();
    let Some(format) = parts.next().and_then(ExportFormat::from_name) else {
        let names: Vec<_> = ExportFormat::ALL.iter().map(|f| f.extension()).collect();
        eprintln!("{} usage: .export <{}> [file]", "✗".red(), names.join("|"));
        return;
    };
    emit(session, format, parts.next(), client, dialect).await;
}

async fn emit(
    session: &EditSession,
    format: ExportFormat,
    file: Option<&str>,
    client: &SqlGeneratorClient,
    dialect: Dialect,
) {
    match render(format, session.tables(), client, dialect).await {
        Ok(text) => {
            if let Err(e) = write_output(file, &text) {
                eprintln!("{} {}", "✗".red(), e.to_string().red());
            } else if file.is_none() {
                println!();
            }
        }
        Err(e) => eprintln!("{} {}", "✗".red(), e.to_string().red()),
    }
}

/// `.template <table> <id|timestamp|foreign_key>`
fn add_template(session: &mut EditSession, arg: &str) {
    let mut parts = arg.split_whitespace();
    let (Some(table), Some(template)) = (parts.next(), parts.next().and_then(ColumnTemplate::from_name)) else {
        eprintln!(
            "{} usage: .template <table> <{}>",
            "✗".red(),
            ColumnTemplate::ALL.map(|t| t.name()).join("|")
        );
        return;
    };
    match session.add_template(table, template) {
        Ok(()) => println!("{} {} column added to {}", "+".green(), template.name(), table),
        Err(e) => eprintln!("{} {}", "✗".red(), e.to_string().red()),
    }
}

/// `.drop <table>` or `.drop <table>.<column>`
fn drop_target(session: &mut EditSession, arg: &str) {
    let result = match arg.split_once('.') {
        Some((table, column)) => session.remove_column(table, column).map(|c| c.name),
        None if !arg.is_empty() => session.remove_table(arg).map(|t| t.name),
        None => {
            eprintln!("{} usage: .drop <table>[.<column>]", "✗".red());
            return;
        }
    };
    match result {
        Ok(name) => println!("{} dropped {}", "-".red(), name),
        Err(e) => eprintln!("{} {}", "✗".red(), e.to_string().red()),
    }
}

/// Show REPL help information.
pub fn show_repl_help() {
    println!("{}", "Commands:".cyan().bold());
    println!("  {:32} - Show the working schema", ".show".yellow());
    println!("  {:32} - Undo / redo the last edit", ".undo  .redo".yellow());
    println!("  {:32} - Add a ready-made column", ".template <table> <kind>".yellow());
    println!("  {:32} - Remove a table or column", ".drop <table>[.<column>]".yellow());
    println!("  {:32} - Print or save an export", ".export <format> [file]".yellow());
    println!("  {:32} - SQL from the generation service", ".generate [dialect]".yellow());
    println!("  {:32} - Show or set the SQL dialect", ".dialect [name]".yellow());
    println!("  {:32} - Load / save a schema file", ".load <file>  .save [file]".yellow());
    println!("  {:32} - Empty the schema", ".reset".yellow());
    println!("  {:32} - Clear screen", ".clear".yellow());
    println!("  {:32} - Exit the REPL", ".exit".yellow());
    println!();
}
