use drift_core::{Category, Effort};

use crate::context::CliResult;

pub fn run() -> CliResult {
    println!("THE CATEGORIES");
    for category in Category::ALL {
        println!(
            "  {} {:<9} {}",
            category.icon(),
            category.as_str().to_uppercase(),
            category.description()
        );
    }
    println!("\nEFFORT LEVELS");
    for effort in Effort::ALL {
        println!(
            "  {:<10} {:<7} {}",
            effort.as_str(),
            effort.label(),
            effort.duration_hint()
        );
    }
    Ok(())
}
