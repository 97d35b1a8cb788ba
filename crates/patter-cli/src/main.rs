//! patter CLI: Terminal chat assistant with canned replies

use clap::{Parser, Subcommand};
use patter_engine::{generate, Config};

/// Chat assistant that answers from a fixed keyword table
#[derive(Parser)]
#[command(name = "patter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Print a single reply without opening the TUI
    Reply {
        /// Input text to respond to
        text: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init,
}

fn main() {
    // Silent unless RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = load_config();
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(patter_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Reply { text, json }) => {
            cmd_reply(&text.join(" "), json);
        }
        Some(Commands::Init) => {
            cmd_init();
        }
    }
}

fn load_config() -> Config {
    Config::path().map_or_else(Config::default, |path| Config::load_or_default(&path))
}

fn cmd_reply(input: &str, json: bool) {
    let reply = generate(input);

    if json {
        let output = serde_json::json!({
            "input": input,
            "reply": reply,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("failed to serialize")
        );
        return;
    }

    println!("{reply}");
}

fn cmd_init() {
    let Some(path) = Config::path() else {
        eprintln!("Could not determine a config directory");
        std::process::exit(1);
    };

    if path.exists() {
        println!("Config already exists at {}", path.display());
        return;
    }

    match Config::default().save(&path) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}
