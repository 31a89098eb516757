//! Command-line interface for regerize
//! Compiles an rgr file (or inline source) and prints the resulting pattern.
//!
//! Usage:
//!   regerize `<path>` [--config `<file>`] [--no-validate] [--legacy-blocks] [--json]
//!   regerize --expr `<source>`                         - Compile inline source
//!   regerize --list-constants                          - List the built-in constants

use clap::{Arg, ArgAction, ArgMatches, Command};
use regerize::config::{Loader, LOCAL_CONFIG_FILE};
use regerize::constants::ConstantTable;
use regerize::{CompileOptions, Compiler};

fn main() {
    let matches = Command::new("regerize")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile rgr pattern descriptions into regular expressions")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the rgr file")
                .required_unless_present_any(["expr", "list-constants"])
                .index(1),
        )
        .arg(
            Arg::new("expr")
                .long("expr")
                .short('e')
                .help("Compile this source instead of a file (imports are not followed)")
                .conflicts_with("path"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the default configuration"),
        )
        .arg(
            Arg::new("no-validate")
                .long("no-validate")
                .help("Print the pattern even if the regex dialect rejects it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("legacy-blocks")
                .long("legacy-blocks")
                .help("Resolve blocks by line-anchored rewriting (a block ends at its first `};`)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the result as a JSON object")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline stages to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-constants")
                .long("list-constants")
                .help("List the built-in constants")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-constants") {
        handle_list_constants_command();
        return;
    }

    let options = load_options(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let compiler = Compiler::with_options(options);

    let result = match matches.get_one::<String>("expr") {
        Some(source) => compiler.compile_str(source),
        None => {
            let path = matches
                .get_one::<String>("path")
                .expect("path is required unless compiling inline source");
            compiler.compile_file(path)
        }
    };

    let json = matches.get_flag("json");
    match result {
        Ok(pattern) if json => println!("{}", serde_json::json!({ "pattern": pattern })),
        Ok(pattern) => println!("{}", pattern),
        Err(e) => {
            if json {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Defaults, then the `--config` file (or `./regerize.toml` if present), then flags.
fn load_options(matches: &ArgMatches) -> Result<CompileOptions, config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG_FILE),
    };
    if matches.get_flag("no-validate") {
        loader = loader.set_override("compiler.validate", false)?;
    }
    if matches.get_flag("legacy-blocks") {
        loader = loader.set_override("compiler.block_mode", "legacy")?;
    }
    Ok(loader.build()?.compiler)
}

/// Handle the list-constants flag
fn handle_list_constants_command() {
    let table = ConstantTable::builtin();
    println!("Built-in constants:\n");
    for name in table.names() {
        let fragment = table.get(name).unwrap_or_default();
        println!("  {:<12} {}", name, fragment.escape_debug());
    }
}
