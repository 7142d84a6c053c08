//! Builder: assembling a search request from optional parameters
//!
//! Run with: cargo run --bin complete_46_builder
//!
//! The second build leaves out the query on purpose, so the process ends
//! with exit status 1.

use colored::Colorize;
use creational_patterns::builder::SearchRequestBuilder;
use creational_patterns::settings::Settings;

fn main() {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(2);
        }
    };
    settings.logging.init();

    println!("{}", "=== Builder with every required field ===".bold());
    let search = &settings.search;
    let result = SearchRequestBuilder::new()
        .query(search.query.as_str())
        .count(search.count)
        .page(search.page)
        .try_build();
    match result {
        Ok(request) => request.search(),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }

    println!("\n{}", "=== Builder without a query ===".bold());
    let result = SearchRequestBuilder::new()
        .count(search.count)
        .page(search.page)
        .try_build();
    match result {
        Ok(request) => request.search(),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
}
