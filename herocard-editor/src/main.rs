use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use clap::{Parser, Subcommand};
use herocard_core::{DisplaySettings, HeroCollection};
use herocard_template::{load_template_with_report, template_file_name, write_template, Template};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "herocard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a template and list every field that had to be repaired.
    Check(CheckArgs),
    /// Rewrite a template as a repaired, current-version file.
    Normalize(NormalizeArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Template JSON file.
    file: PathBuf,

    /// Print repairs as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Template JSON file.
    file: PathBuf,

    /// Output path. Defaults to `<hero-slug>-template.json` next to the input.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Normalize(args) => cmd_normalize(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let (template, repairs) = load_template_with_report(&args.file)?;

    if args.json {
        let out = serde_json::to_string_pretty(&repairs).context("serialize repairs")?;
        println!("{out}");
        return Ok(());
    }

    let hero = &template.hero_data;
    println!(
        "{}: \"{}\" (version {})",
        args.file.display(),
        template.name,
        template.version
    );
    if hero.has_known_role() {
        println!("  role: {}", hero.role);
    } else {
        println!("  role: {} (no artwork)", hero.role);
    }
    let counts: Vec<String> = HeroCollection::ALL
        .iter()
        .map(|c| format!("{}={}", c.key(), hero.item_count(*c)))
        .collect();
    println!("  items: {}", counts.join(" "));
    let display = template.display_settings_over(&DisplaySettings::default());
    println!("  export scale: {}", display.effective_export_scale());

    if repairs.is_empty() {
        println!("no repairs needed");
    } else {
        for repair in &repairs {
            println!("  {repair}");
        }
        println!("{} field(s) repaired", repairs.len());
    }
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let (template, repairs) = load_template_with_report(&args.file)?;

    let display = template.display_settings_over(&DisplaySettings::default());
    let mut normalized = Template::from_state(&template.hero_data, &display, Utc::now());
    if let Some(thumbnail) = template.thumbnail {
        normalized = normalized.with_thumbnail(thumbnail);
    }

    let out = args
        .out
        .unwrap_or_else(|| args.file.with_file_name(template_file_name(&template.hero_data.name)));
    write_template(&out, &normalized)?;

    eprintln!("wrote {} ({} repair(s))", out.display(), repairs.len());
    Ok(())
}
