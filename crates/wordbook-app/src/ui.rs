use std::fmt::Write as _;

use kanal::AsyncReceiver;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use wordbook_types::{Role, SpeakTarget, UiCommand, View, WordEntry};

pub const HELP: &str = "\
Commands:
  setup <native> <target>   choose your languages (e.g. `setup es en`)
  languages                 list language codes
  lookup <word or phrase>   generate a new entry
  save                      save or unsave the entry on screen
  notebook                  list saved entries
  open <n>                  show saved entry number n
  remove <id>               delete a saved entry
  ask <question>            ask the tutor about the entry on screen
  speak [word|example|reply]
  study | next | prev | flip
  story                     a short story from your saved words
  help | quit";

/// Parse one input line
pub fn parse_command(line: &str) -> Result<UiCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_lowercase().as_str() {
        "setup" => {
            let mut codes = rest.split_whitespace();
            match (codes.next(), codes.next(), codes.next()) {
                (Some(native), Some(target), None) => UiCommand::Setup {
                    native: native.to_string(),
                    target: target.to_string(),
                },
                _ => return Err("Usage: setup <native> <target>".to_string()),
            }
        }
        "languages" | "langs" => UiCommand::Languages,
        "lookup" | "l" => UiCommand::Lookup(rest.to_string()),
        "save" | "s" => UiCommand::Save,
        "notebook" | "nb" => UiCommand::Notebook,
        "remove" | "rm" if !rest.is_empty() => UiCommand::Remove(rest.to_string()),
        "open" => match rest.parse() {
            Ok(position) => UiCommand::Open(position),
            Err(_) => return Err("Usage: open <number>".to_string()),
        },
        "ask" | "?" => UiCommand::Ask(rest.to_string()),
        "speak" | "say" => match rest {
            "" | "word" => UiCommand::Speak(SpeakTarget::Word),
            "example" => UiCommand::Speak(SpeakTarget::Example),
            "reply" => UiCommand::Speak(SpeakTarget::Reply),
            _ => return Err("Usage: speak [word|example|reply]".to_string()),
        },
        "study" => UiCommand::Study,
        "next" | "n" => UiCommand::Next,
        "prev" | "previous" | "p" => UiCommand::Previous,
        "flip" | "f" => UiCommand::Flip,
        "story" => UiCommand::Story,
        "help" | "h" => UiCommand::Help,
        "quit" | "exit" | "q" => UiCommand::Quit,
        "" => return Err(String::new()),
        _ => return Err(format!("Unknown command `{head}`. Type `help`.")),
    };

    Ok(command)
}

/// Plain-text rendering of a view
pub fn render(view: &View) -> String {
    let mut out = String::new();

    match view {
        View::SetupRequired => {
            out.push_str("Welcome! Pick your languages with `setup <native> <target>`.\n");
            out.push_str("Type `languages` to see the codes.\n");
        }
        View::Status(message) => {
            let _ = writeln!(out, "{message}");
        }
        View::Loading(message) => {
            let _ = writeln!(out, "… {message}");
        }
        View::Idle => out.push_str("Nothing found. Try again.\n"),
        View::Entry { entry, saved } => {
            render_entry(&mut out, entry);
            let _ = writeln!(
                out,
                "[{}]",
                if *saved { "saved" } else { "not saved: `save` to keep it" }
            );
        }
        View::Notebook(entries) if entries.is_empty() => {
            out.push_str("Your notebook is empty.\n");
        }
        View::Notebook(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {}  ({})", i + 1, entry.word, entry.id);
            }
        }
        View::ChatReply(message) => {
            let who = match message.role {
                Role::User => "you",
                Role::Model => "tutor",
            };
            let _ = writeln!(out, "{who}> {}", message.text);
        }
        View::Card {
            position,
            total,
            entry,
            flipped,
        } => {
            let _ = writeln!(out, "Card {position}/{total}");
            if *flipped {
                let _ = writeln!(out, "  {}", entry.definition);
                match entry.primary_example() {
                    Some(example) => {
                        let _ = writeln!(out, "  {} / {}", example.target, example.native);
                    }
                    None => out.push_str("  (no example)\n"),
                }
            } else {
                let _ = writeln!(out, "  {}", entry.word);
                out.push_str("  `flip` to see the meaning\n");
            }
        }
        View::EmptyStudy => out.push_str("Nothing to study yet. Save a few words first.\n"),
        View::Story(story) => {
            let _ = writeln!(out, "{story}");
        }
        View::Languages(languages) => {
            for language in languages {
                let _ = writeln!(out, "  {} {}  {}", language.flag, language.code, language.name);
            }
        }
        View::Help => {
            let _ = writeln!(out, "{HELP}");
        }
    }

    out
}

fn render_entry(out: &mut String, entry: &WordEntry) {
    let _ = writeln!(out, "{}", entry.word);
    let _ = writeln!(out, "  {}", entry.definition);
    for example in &entry.examples {
        let _ = writeln!(out, "  • {}", example.target);
        let _ = writeln!(out, "    {}", example.native);
    }
    if !entry.usage.is_empty() {
        let _ = writeln!(out, "  Usage: {}", entry.usage);
    }
    if entry.has_image() {
        out.push_str("  (illustration available)\n");
    }
}

/// Draws every view the controller sends until shutdown
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<View>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    loop {
        let view = tokio::select! {
            _ = cancel.cancelled() => break,
            view = app_to_ui_rx.recv() => view?,
        };

        stdout.write_all(render(&view).as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
