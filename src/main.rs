use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gedtree::interactive::Session;
use gedtree::{render, Config, RelationshipEngine, Store};
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gedtree")]
#[command(about = "Load a GEDCOM file and query descendants, ancestors and kinship")]
#[command(version)]
struct Args {
    /// GEDCOM file to load (defaults to input.default_file in gedtree.toml)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every individual and family, sorted by id
    List,
    /// Descendant chart of one person
    Descendants { id: String },
    /// Ancestor chart of one person
    Ancestors { id: String },
    /// Check whether OTHER descends from ANCESTOR
    IsDescendant { ancestor: String, other: String },
    /// Closest common ancestor of two people and their relationship
    CommonAncestor { a: String, b: String },
    /// Prompt for people and run every query in turn (default)
    Interactive,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.general.log_level.as_str()),
    )
    .init();

    let path = config.input_file(args.file.as_deref())?;
    let store = gedtree::load_file(&path)
        .with_context(|| format!("Failed to load GEDCOM file {}", path.display()))?;

    let engine = RelationshipEngine::new(&store).with_max_generations(config.graph.max_generations);

    match args.command.unwrap_or(Command::Interactive) {
        Command::List => {
            if args.json {
                print_json(&store)?;
            } else {
                print!("{}", render::render_listing(&store));
            }
        }
        Command::Descendants { id } => {
            ensure_known(&store, &id)?;
            let chart = engine.descendant_chart(&id)?;
            if args.json {
                print_json(&chart)?;
            } else {
                print!("{}", render::render_descendants(&store, &chart));
            }
        }
        Command::Ancestors { id } => {
            ensure_known(&store, &id)?;
            let chart = engine.ancestor_chart(&id)?;
            if args.json {
                print_json(&chart)?;
            } else {
                print!("{}", render::render_ancestors(&store, &chart));
            }
        }
        Command::IsDescendant { ancestor, other } => {
            ensure_known(&store, &ancestor)?;
            ensure_known(&store, &other)?;
            let descends = engine.is_descendant(&ancestor, &other)?;
            if args.json {
                print_json(&serde_json::json!({
                    "ancestor": ancestor,
                    "other": other,
                    "is_descendant": descends,
                }))?;
            } else {
                println!("{} is a descendant of {}: {}", other, ancestor, descends);
            }
        }
        Command::CommonAncestor { a, b } => {
            ensure_known(&store, &a)?;
            ensure_known(&store, &b)?;
            let found = engine.closest_common_ancestor(&a, &b)?;
            if args.json {
                print_json(&found)?;
            } else {
                print!("{}", render::render_common_ancestor(&store, &a, &b, found.as_ref()));
            }
        }
        Command::Interactive => {
            let stdin = io::stdin();
            Session::new(engine, stdin.lock(), io::stdout()).run()?;
        }
    }

    Ok(())
}

/// Query ids are checked here so the engine is only called with known people
fn ensure_known(store: &Store, id: &str) -> Result<()> {
    if !store.contains_individual(id) {
        anyhow::bail!("Unknown individual id: {}. Run `gedtree list` to see valid ids.", id);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
