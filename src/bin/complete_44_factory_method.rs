//! Factory Method: choosing a rule-config parser by file extension
//!
//! Run with: cargo run --bin complete_44_factory_method
//! Point `PATTERNS_CONFIG` at a TOML file to change the filenames tried.

use colored::Colorize;
use creational_patterns::factory::{
    new_rule_config_parser, select_by_extension, ParserError, RuleConfigParser,
    SimpleParserFactory,
};
use creational_patterns::settings::Settings;

fn run(strategy: &str, filename: &str, selected: Result<Box<dyn RuleConfigParser>, ParserError>) {
    match selected {
        Ok(parser) => {
            let _config = parser.parse(filename);
        }
        Err(err) => tracing::warn!(strategy, "{err}"),
    }
}

fn main() {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(2);
        }
    };
    settings.logging.init();

    let simple_factory = SimpleParserFactory;

    for filename in &settings.factory.filenames {
        println!("\n{}", format!("=== {filename} ===").bold());

        // Usage: every caller repeats the if / else if chain.
        println!("{}", "--- Inline if / else if ---".cyan());
        run("inline", filename, select_by_extension(filename));

        // Usage: one object owns the chain; new formats edit it.
        println!("{}", "--- Simple factory ---".cyan());
        run("simple-factory", filename, simple_factory.create_parser(filename));

        // Usage: each format has its own factory; new formats register one.
        println!("{}", "--- Factory method ---".cyan());
        run("factory-method", filename, new_rule_config_parser(filename));
    }
}
