use crate::core::SearchResult;
use crate::highlight::{Annotation, Highlighter};
use crate::session::View;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

pub fn print_banner() {
    println!();
    println!(
        "   {}  {}",
        "DINNERTIME".red().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("   {}", "Ingredient Match Recipe Finder".white());
    println!();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn log_error(msg: &str) {
    println!("{} {}", "✖ Error:".red().bold(), msg);
}

pub fn log_success(msg: &str) {
    println!("{} {}", "✔ Success:".green().bold(), msg);
}

pub fn render_view(view: &View, terms: &[String]) {
    match view {
        View::Idle => println!(
            "{}",
            "No search active. Add ingredients to find recipes.".dimmed()
        ),
        View::Loading => println!("{}", "Searching recipes...".dimmed()),
        View::Error(msg) => log_error(msg),
        View::Success(result) => render_results(result, terms),
    }
}

fn render_results(result: &SearchResult, terms: &[String]) {
    if result.values.is_empty() {
        println!("No recipes found for the ingredients");
        return;
    }

    println!(
        "{}",
        format!("Page {} of {}", result.page_number, result.total_pages).bold()
    );
    println!();

    let highlighter = Highlighter::new(terms);

    for matched in &result.values {
        let recipe = &matched.recipe;

        println!("{}", recipe.title.green().bold());
        println!("   {}", recipe.image_url.dimmed());
        println!(
            "   preparation time: {} minutes   cook time: {} minutes   rating: {}",
            recipe.prep_time_mins,
            recipe.cook_time_mins,
            recipe.rating.cyan()
        );
        println!(
            "   {} Ingredient{}",
            recipe.ingredients.len(),
            plural(recipe.ingredients.len())
        );

        for ingredient in &recipe.ingredients {
            let line = format!("- {}", ingredient);
            println!("   {}", paint(&line, &highlighter.annotate(&line)));
        }

        println!(
            "   {}",
            format!(
                "missing {} ingredient{}",
                matched.unmatched_ingredients,
                plural(matched.unmatched_ingredients as usize)
            )
            .dimmed()
        );
        println!();
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

// Rebuilds the line with every matched span colored.
fn paint(line: &str, annotation: &Annotation) -> String {
    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;

    for &(start, end) in &annotation.spans {
        out.push_str(&line[cursor..start]);
        out.push_str(&format!("{}", (&line[start..end]).yellow().bold()));
        cursor = end;
    }
    out.push_str(&line[cursor..]);
    out
}
