use anyhow::{Context, Result};
use clap::Parser;
use gedtree::{Config, EventKind, Store};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stats")]
#[command(about = "Summarise a GEDCOM file and report cross-reference problems")]
struct Args {
    /// GEDCOM file to load (defaults to input.default_file in gedtree.toml)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn count_events(store: &Store, kind: EventKind) -> usize {
    store
        .individuals()
        .flat_map(|p| p.events.iter())
        .filter(|e| e.kind == kind)
        .count()
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
    let report = store.integrity_report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
            "file": path.display().to_string(),
            "individuals": store.individual_count(),
            "families": store.family_count(),
            "births": count_events(&store, EventKind::Birth),
            "deaths": count_events(&store, EventKind::Death),
            "marriages": count_events(&store, EventKind::Marriage),
            "integrity": report,
        }))?);
        return Ok(());
    }

    let childless = store.families().filter(|f| f.children.is_empty()).count();
    let without_parents = store
        .individuals()
        .filter(|p| store.parent_family_of(&p.id).is_none())
        .count();

    println!("\n=== GEDCOM Statistics: {} ===\n", path.display());
    println!("{:-<50}", "");
    println!("{:<30} {:>12}", "Individuals", store.individual_count());
    println!("{:<30} {:>12}", "Families", store.family_count());
    println!("{:<30} {:>12}", "  without children", childless);
    println!("{:<30} {:>12}", "Individuals without parents", without_parents);
    println!("{:<30} {:>12}", "Birth events", count_events(&store, EventKind::Birth));
    println!("{:<30} {:>12}", "Death events", count_events(&store, EventKind::Death));
    println!("{:<30} {:>12}", "Marriage events", count_events(&store, EventKind::Marriage));
    println!("{:-<50}", "");

    if report.is_clean() {
        println!("\nAll cross-references resolve.");
        return Ok(());
    }

    if !report.dangling.is_empty() {
        println!("\nDangling references ({}):", report.dangling.len());
        for d in &report.dangling {
            println!("  {} {} -> {}", d.from, d.kind.as_str(), d.to);
        }
    }

    if !report.ambiguous_parentage.is_empty() {
        println!("\nAmbiguous parentage ({}):", report.ambiguous_parentage.len());
        for a in &report.ambiguous_parentage {
            println!("  {} claimed by {}", a.individual, a.families.join(", "));
        }
    }

    println!();

    Ok(())
}
