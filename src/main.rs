mod config;
mod core;
mod engine;
mod highlight;
mod query;
mod session;
mod ui;

use crate::config::ConfigManager;
use crate::engine::{HttpMatchEngine, MatchEngine};
use crate::session::{FetchOutcome, SearchSession};
use crate::ui::{log_error, log_success, print_banner};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

#[derive(Parser)]
#[command(name = "dinnertime")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One-shot search for recipes matching the given ingredients
    Search {
        ingredients: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Interactive session: edit ingredients and page through results
    Cook,
    Config {
        #[arg(long)]
        set_api_base: Option<String>,
        #[arg(long, action)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    print_banner();
    if let Err(e) = run().await {
        log_error(&e.to_string());
        exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let root = dinnertime_root();
    if !root.exists() {
        std::fs::create_dir_all(&root)?;
    }

    let config_manager = ConfigManager::new(&root);
    let mut config = config_manager.load().await?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { ingredients, page } => {
            let terms = clean_terms(ingredients);
            if terms.is_empty() {
                anyhow::bail!("give at least one ingredient to search for");
            }
            let engine = Arc::new(HttpMatchEngine::new(config.api_base_url.clone())?);
            run_search(engine, terms, page).await;
        }
        Commands::Cook => {
            let engine = Arc::new(HttpMatchEngine::new(config.api_base_url.clone())?);
            run_interactive(engine, clean_terms(config.default_ingredients.clone())).await?;
        }
        Commands::Config { set_api_base, show } => {
            if let Some(url) = set_api_base {
                config.api_base_url = url.clone();
                config_manager.save(&config).await?;
                log_success(&format!("API base URL updated to: {}", url));
            } else if show {
                println!("Current Configuration:");
                println!("   API base URL: {}", config.api_base_url);
                println!(
                    "   Default ingredients: {}",
                    config.default_ingredients.join(", ")
                );
            } else {
                println!("Use --show or --set-api-base <URL>");
            }
        }
    }

    Ok(())
}

fn dinnertime_root() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dinnertime")
}

fn clean_terms(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

async fn run_search(engine: Arc<dyn MatchEngine>, terms: Vec<String>, page: u32) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = SearchSession::new(engine, tx);

    session.set_terms(terms);
    settle(&mut session, &mut rx).await;

    // Page bounds come from the engine, so a later page needs the first
    // result before it can be requested.
    if page > 1 && session.set_page(page).is_ok() {
        settle(&mut session, &mut rx).await;
    }

    ui::render_view(session.view(), session.terms());
}

async fn settle(session: &mut SearchSession, rx: &mut UnboundedReceiver<FetchOutcome>) {
    if !session.is_loading() {
        return;
    }
    let spinner = ui::create_spinner("Searching recipes...");
    while session.is_loading() {
        match rx.recv().await {
            Some(outcome) => {
                session.apply(outcome);
            }
            None => break,
        }
    }
    spinner.finish_and_clear();
}

async fn run_interactive(engine: Arc<dyn MatchEngine>, seed: Vec<String>) -> anyhow::Result<()> {
    println!("Write your ingredients and press ENTER to find the most relevant recipes");
    print_interactive_help();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = SearchSession::new(engine, tx);
    session.set_terms(seed);
    print_terms(session.terms());
    ui::render_view(session.view(), session.terms());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(&mut session, line.trim()) {
                    break;
                }
            }
            Some(outcome) = rx.recv() => {
                if session.apply(outcome) {
                    ui::render_view(session.view(), session.terms());
                }
            }
        }
    }

    Ok(())
}

/// Applies one interactive command. Returns false when the session ends.
fn handle_command(session: &mut SearchSession, line: &str) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    };

    match command {
        "" => return true,
        "quit" | "exit" | "q" => return false,
        "help" | "?" => {
            print_interactive_help();
            return true;
        }
        "terms" => {
            print_terms(session.terms());
            return true;
        }
        "add" if !rest.is_empty() => {
            let mut terms = session.terms().to_vec();
            terms.push(rest.to_string());
            session.set_terms(terms);
        }
        "rm" if !rest.is_empty() => {
            let mut terms = session.terms().to_vec();
            if let Some(pos) = terms.iter().position(|t| t.eq_ignore_ascii_case(rest)) {
                terms.remove(pos);
                session.set_terms(terms);
            } else {
                log_error(&format!("'{}' is not an active ingredient", rest));
                return true;
            }
        }
        "add" | "rm" => {
            log_error(&format!("usage: {} <term>", command));
            return true;
        }
        "clear" => session.set_terms(Vec::new()),
        "page" => match rest.parse::<u32>() {
            Ok(n) => {
                if let Err(e) = session.set_page(n) {
                    log_error(&e.to_string());
                    return true;
                }
            }
            Err(_) => {
                log_error("usage: page <number>");
                return true;
            }
        },
        "next" => {
            if let Err(e) = session.set_page(session.page() + 1) {
                log_error(&e.to_string());
                return true;
            }
        }
        "prev" => {
            if let Err(e) = session.set_page(session.page().saturating_sub(1)) {
                log_error(&e.to_string());
                return true;
            }
        }
        // Anything else is read as a comma-separated list replacing the
        // active ingredients.
        _ => {
            let terms = clean_terms(line.split(',').map(String::from).collect());
            session.set_terms(terms);
        }
    }

    print_terms(session.terms());
    ui::render_view(session.view(), session.terms());
    true
}

fn print_terms(terms: &[String]) {
    if terms.is_empty() {
        println!("{}", "Ingredients: (none)".dimmed());
    } else {
        println!("{} {}", "Ingredients:".bold(), terms.join(", "));
    }
}

fn print_interactive_help() {
    println!("{}", "Commands:".bold());
    println!("   <a, b, c>     replace the ingredient list");
    println!("   add <term>    add one ingredient");
    println!("   rm <term>     remove one ingredient");
    println!("   page <n>      jump to a page");
    println!("   next / prev   page through results");
    println!("   clear         drop all ingredients");
    println!("   terms         show the active ingredients");
    println!("   quit          leave");
    println!();
}
