//! chainsel CLI
//!
//! Compiles a selector and evaluates it against one ancestor chain given as
//! JSON. Exit status is 0 on a match, 1 on no match and 2 on any error.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chainsel_common::warning::warn_once;
use chainsel_html::unknown_references;
use chainsel_selector::{Element, MatchOptions, ParseError, parse_selector};
use clap::Parser;
use owo_colors::OwoColorize;

/// chainsel: match a CSS selector against an element's ancestor chain
#[derive(Parser, Debug)]
#[command(name = "chainsel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Does the last element of the chain match?
    chainsel 'ul.menu > li' --chain '[{"name":"ul","attributes":{"class":"menu"}},{"name":"li"}]'

    # Read the chain from a file, or from stdin when no chain is given
    chainsel 'a[href^="https"]' --chain-file chain.json
    echo '[{"name":"p"}]' | chainsel p

    # Show the compiled selector tree
    chainsel --ast 'div p, h1'
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Selector to compile
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Ancestor chain as a JSON array, outermost ancestor first
    #[arg(long, value_name = "JSON", conflicts_with = "chain_file")]
    chain: Option<String>,

    /// Read the ancestor chain from a JSON file
    #[arg(long, value_name = "PATH")]
    chain_file: Option<PathBuf>,

    /// Require the match to start at the outermost element of the chain
    #[arg(long)]
    exact_start: bool,

    /// Also match when the selected element has descendants in the chain
    #[arg(long, conflicts_with = "leaf_only")]
    children: bool,

    /// Only match when the last element of the chain is selected (default)
    #[arg(long)]
    leaf_only: bool,

    /// Print the compiled selector tree as JSON and exit
    #[arg(long)]
    ast: bool,

    /// Print nothing; report the result through the exit status only
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    const fn options(&self) -> MatchOptions {
        MatchOptions::new(!self.exact_start, self.children && !self.leaf_only)
    }

    fn warn(&self, component: &str, message: &str) {
        if !self.quiet {
            let _ = warn_once(component, message);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            if !cli.quiet {
                report(&err);
            }
            ExitCode::from(2)
        }
    }
}

/// Returns whether the chain matched. `--ast` counts as a match.
fn run(cli: &Cli) -> Result<bool> {
    let selector = parse_selector(&cli.selector)?;
    for name in unknown_references(&cli.selector) {
        cli.warn("HTML", &format!("unknown character reference '&{name};'"));
    }

    if cli.ast {
        let json = serde_json::to_string_pretty(&selector)?;
        if !cli.quiet {
            println!("{json}");
        }
        return Ok(true);
    }

    let chain = load_chain(cli)?;
    for (index, element) in chain.iter().enumerate() {
        if element.name.is_empty() {
            cli.warn(
                "CLI",
                &format!("chain element {index} has an empty name and only matches '*'"),
            );
        }
    }

    let matched = selector.matches(&chain, 0, cli.options());
    if !cli.quiet {
        if matched {
            println!("{}", "match".green());
        } else {
            println!("{}", "no match".red());
        }
    }
    Ok(matched)
}

fn load_chain(cli: &Cli) -> Result<Vec<Element>> {
    let json = if let Some(ref json) = cli.chain {
        json.clone()
    } else if let Some(ref path) = cli.chain_file {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read chain file {}", path.display()))?
    } else {
        let mut json = String::new();
        let _ = io::stdin()
            .read_to_string(&mut json)
            .context("failed to read chain from stdin")?;
        json
    };

    serde_json::from_str(&json)
        .context("chain must be a JSON array of {\"name\", \"attributes\"} objects")
}

/// Print an error to stderr. Parse errors get the selector text with a caret
/// under the failing position.
fn report(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "error:".red().bold());

    if let Some(parse_error) = err.downcast_ref::<ParseError>() {
        let input = parse_error.input();
        let column = input
            .get(..parse_error.offset())
            .map_or(parse_error.offset(), |prefix| prefix.chars().count());
        eprintln!("  {input}");
        eprintln!("  {}{}", " ".repeat(column), "^".yellow().bold());
    }
}
