use clap::{Parser, Subcommand};
use hub_index::{config, generate, output, scan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hub-index")]
#[command(about = "Build a landing page indexing the HTML modules in a directory")]
#[command(long_about = "\
Build a landing page indexing the HTML modules in a directory

Every subdirectory of the root becomes a category and every .html file in it
becomes a card on the generated index.html.

Content structure:

  root/
  ├── hub.toml                 # Optional config (see gen-config)
  ├── index.html               # Generated, overwritten on every build
  ├── algorithms/              # Category ALGORITHMS
  │   ├── heap.html
  │   └── k-means.html
  ├── llm/                     # Category LLM
  │   └── rag.html
  └── assets/                  # Ignored (also .git, css, js, images, ...)

Markers read from each module (all optional, case-insensitive):
  <title>Binary Heap</title>                        card title
  <meta name=\"description\" content=\"...\">          card text
  <!-- order: 1 -->                                 position in category
  <!-- icon: 🌲 -->                                  card icon

Run without a command to build the index for the current directory.")]
#[command(version)]
struct Cli {
    /// Root directory whose subdirectories become categories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the root and write the landing page (default)
    Build,
    /// Print the scanned category index as JSON
    Scan,
    /// Scan and list what would be indexed, without writing anything
    Check,
    /// Print a stock hub.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let hub_config = config::load_config(&cli.root)?;
            generate::build(&cli.root, &hub_config)?;
        }
        Command::Scan => {
            let hub_config = config::load_config(&cli.root)?;
            let index = scan::scan(&cli.root, &hub_config)?;
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
        Command::Check => {
            let hub_config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let index = scan::scan(&cli.root, &hub_config)?;
            output::print_scan_output(&index);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
