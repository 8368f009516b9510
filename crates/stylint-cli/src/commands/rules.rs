//! Rules command implementation.

use stylint_core::Rule;
use stylint_rules::all_rules;

fn capabilities(rule: &dyn Rule) -> String {
    let flags = [
        (rule.as_opt_in().is_some(), "opt-in"),
        (rule.as_correctable().is_some(), "correctable"),
        (rule.as_configurable().is_some(), "configurable"),
    ];
    let names: Vec<&str> = flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

/// Runs the rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<30} {:<26} Description", "Identifier", "Capabilities");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        let description = rule.description();
        println!(
            "{:<30} {:<26} {}",
            description.identifier,
            capabilities(rule.as_ref()),
            description.description
        );
    }

    println!("\nOpt-in rules only run when listed in `opt_in_rules`.");
    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  stylint lint --rules statement_position,line_length");
}
