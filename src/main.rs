// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rangemark CLI entrypoint.
//!
//! A headless shell over [`rangemark::HighlightSession`]: list, add, remove and clear the
//! highlights stored in a workspace's `.rangemark/highlights.json`.

use std::error::Error;
use std::path::{Path, PathBuf};

use rangemark::model::{DocumentId, TextRange};
use rangemark::store::WriteDurability;
use rangemark::{HeadlessHost, HighlightConfig, HighlightSession, HighlightsFile};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RANGEMARK_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--workspace <dir>] [--config <file>] [--durable-writes] <command>\n\nCommands:\n  list [<path>]\n  add <path> <start-line> <start-char> <end-line> <end-char> [<color> [<name> [<description>]]]\n  remove <path> <line> <char> <line> <char>\n  clear-document <path>\n  clear-workspace\n\nWithout a command, `list` is run.\nPaths are relative to the workspace (default: current directory) unless absolute.\nWithout --config, <workspace>/.rangemark/config.json is read when present.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\nSet {LOG_ENV} (e.g. `{LOG_ENV}=debug`) to adjust logging on stderr."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List {
        path: Option<String>,
    },
    Add {
        path: String,
        coords: [u32; 4],
        color: Option<String>,
        name: Option<String>,
        description: Option<String>,
    },
    Remove {
        path: String,
        coords: [u32; 4],
    },
    ClearDocument {
        path: String,
    },
    ClearWorkspace,
}

impl Default for Command {
    fn default() -> Self {
        Self::List { path: None }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    workspace: Option<String>,
    config: Option<String>,
    durable_writes: bool,
    command: Command,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--workspace" => {
                if options.workspace.is_some() {
                    return Err(());
                }
                options.workspace = Some(args.next().ok_or(())?);
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with("--") => return Err(()),
            _ => positional.push(arg),
        }
    }

    options.command = parse_command(positional)?;
    Ok(options)
}

fn parse_command(positional: Vec<String>) -> Result<Command, ()> {
    let mut args = positional.into_iter();
    let Some(name) = args.next() else {
        return Ok(Command::default());
    };
    let rest: Vec<String> = args.collect();

    match (name.as_str(), rest.as_slice()) {
        ("list", []) => Ok(Command::List { path: None }),
        ("list", [path]) => Ok(Command::List {
            path: Some(path.clone()),
        }),
        ("add", [path, coords @ ..]) if (4..=7).contains(&coords.len()) => {
            let (numbers, metadata) = coords.split_at(4);
            Ok(Command::Add {
                path: path.clone(),
                coords: parse_coords(numbers)?,
                color: metadata.first().cloned(),
                name: metadata.get(1).cloned(),
                description: metadata.get(2).cloned(),
            })
        }
        ("remove", [path, coords @ ..]) if coords.len() == 4 => Ok(Command::Remove {
            path: path.clone(),
            coords: parse_coords(coords)?,
        }),
        ("clear-document", [path]) => Ok(Command::ClearDocument { path: path.clone() }),
        ("clear-workspace", []) => Ok(Command::ClearWorkspace),
        _ => Err(()),
    }
}

fn parse_coords(raw: &[String]) -> Result<[u32; 4], ()> {
    let mut coords = [0u32; 4];
    for (slot, value) in coords.iter_mut().zip(raw) {
        *slot = value.parse().map_err(|_| ())?;
    }
    Ok(coords)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn document(root: &Path, raw: &str) -> Result<DocumentId, Box<dyn Error>> {
    Ok(DocumentId::new(root.join(raw))?)
}

fn range_from(coords: [u32; 4]) -> Result<TextRange, Box<dyn Error>> {
    let [start_line, start_character, end_line, end_character] = coords;
    Ok(TextRange::from_coords(
        start_line,
        start_character,
        end_line,
        end_character,
    )?)
}

fn display_path<'a>(root: &Path, document: &'a DocumentId) -> std::borrow::Cow<'a, str> {
    document
        .as_path()
        .strip_prefix(root)
        .unwrap_or(document.as_path())
        .to_string_lossy()
}

async fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let dir = options.workspace.unwrap_or_else(|| ".".to_owned());
    let durability = if options.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };
    let file = HighlightsFile::new(std::env::current_dir()?.join(dir))?.with_durability(durability);
    let root = file.root().to_path_buf();

    let config_path = options
        .config
        .map(PathBuf::from)
        .unwrap_or_else(|| HighlightConfig::default_path(&root));
    let (config, _) = HighlightConfig::load_or_default(&config_path);

    let mut session = HighlightSession::new(file, config, HeadlessHost::new());
    session.reload_from_disk().await;

    match options.command {
        Command::List { path } => {
            let filter = path.map(|raw| document(&root, &raw)).transpose()?;
            for (doc, index) in session.documents() {
                if filter.as_ref().is_some_and(|wanted| wanted != doc) {
                    continue;
                }
                let shown = display_path(&root, doc);
                for (color, highlight) in index.iter() {
                    println!(
                        "{shown}\t{color}\t{}\t{}",
                        highlight.range(),
                        highlight.name()
                    );
                }
            }
        }
        Command::Add {
            path,
            coords,
            color,
            name,
            description,
        } => {
            let doc = document(&root, &path)?;
            let range = range_from(coords)?;
            match (color, name) {
                (None, _) => session.add_default_highlight(&doc, range)?,
                (Some(color), None) => session.add_highlight_in_color(&doc, range, &color)?,
                (Some(color), Some(name)) => session.add_highlight(
                    &doc,
                    range,
                    &color,
                    &name,
                    description.as_deref().unwrap_or_default(),
                )?,
            }
        }
        Command::Remove { path, coords } => {
            let doc = document(&root, &path)?;
            let removed = session.remove_near(&doc, &range_from(coords)?);
            println!("removed {removed}");
        }
        Command::ClearDocument { path } => {
            session.clear_document(&document(&root, &path)?);
        }
        Command::ClearWorkspace => session.clear_workspace()?,
    }

    let errors = session.host().error_count();
    session.close();
    if errors > 0 {
        return Err(format!("{errors} error(s) reported, see log output").into());
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "rangemark".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run(options))
    })();

    if let Err(err) = result {
        eprintln!("rangemark: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions, Command};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_empty_args_as_list() {
        let options = parse(&[]).expect("parse options");
        assert_eq!(options, CliOptions::default());
        assert_eq!(options.command, Command::List { path: None });
    }

    #[test]
    fn parses_global_flags_anywhere() {
        let options = parse(&[
            "list",
            "--workspace",
            "some/dir",
            "--durable-writes",
            "--config",
            "cfg.json",
        ])
        .expect("parse options");
        assert_eq!(options.workspace.as_deref(), Some("some/dir"));
        assert_eq!(options.config.as_deref(), Some("cfg.json"));
        assert!(options.durable_writes);
    }

    #[test]
    fn parses_list_with_path() {
        let options = parse(&["list", "src/a.rs"]).expect("parse options");
        assert_eq!(
            options.command,
            Command::List {
                path: Some("src/a.rs".to_owned())
            }
        );
    }

    #[test]
    fn parses_add_with_optional_metadata() {
        let options = parse(&["add", "a.rs", "1", "0", "2", "5"]).expect("parse options");
        assert_eq!(
            options.command,
            Command::Add {
                path: "a.rs".to_owned(),
                coords: [1, 0, 2, 5],
                color: None,
                name: None,
                description: None,
            }
        );

        let options = parse(&["add", "a.rs", "1", "0", "2", "5", "#2196F366", "Blue", "why"])
            .expect("parse options");
        let Command::Add {
            color,
            name,
            description,
            ..
        } = options.command
        else {
            panic!("expected add");
        };
        assert_eq!(color.as_deref(), Some("#2196F366"));
        assert_eq!(name.as_deref(), Some("Blue"));
        assert_eq!(description.as_deref(), Some("why"));
    }

    #[test]
    fn parses_remove_and_clear_commands() {
        let options = parse(&["remove", "a.rs", "3", "0", "3", "5"]).expect("parse options");
        assert_eq!(
            options.command,
            Command::Remove {
                path: "a.rs".to_owned(),
                coords: [3, 0, 3, 5],
            }
        );

        let options = parse(&["clear-document", "a.rs"]).expect("parse options");
        assert_eq!(
            options.command,
            Command::ClearDocument {
                path: "a.rs".to_owned()
            }
        );

        let options = parse(&["clear-workspace"]).expect("parse options");
        assert_eq!(options.command, Command::ClearWorkspace);
    }

    #[test]
    fn rejects_bad_coordinates() {
        parse(&["add", "a.rs", "1", "x", "2", "5"]).unwrap_err();
        parse(&["add", "a.rs", "1", "0", "2"]).unwrap_err();
        parse(&["remove", "a.rs", "-1", "0", "2", "5"]).unwrap_err();
        parse(&["remove", "a.rs", "1", "0", "2", "5", "#FFEB3B66"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args_and_commands() {
        parse(&["--nope"]).unwrap_err();
        parse(&["rename", "a.rs"]).unwrap_err();
        parse(&["clear-workspace", "extra"]).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse(&["--durable-writes", "--durable-writes"]).unwrap_err();
        parse(&["--workspace", ".", "--workspace", "other"]).unwrap_err();
        parse(&["--config", "a.json", "--config", "b.json"]).unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse(&["--workspace"]).unwrap_err();
        parse(&["--config"]).unwrap_err();
    }
}
