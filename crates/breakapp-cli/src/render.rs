//! Colored terminal output.

use breakapp_application::{CommandResponse, ConfirmationResult, ResultKind};
use breakapp_core::geo::Distanced;
use breakapp_core::language::Language;
use breakapp_core::menu::Restaurant;
use colored::Colorize;

pub fn response(response: &CommandResponse, language: Language) {
    let message = match response.kind {
        ResultKind::Staged => response.message.bright_yellow(),
        ResultKind::ClarificationNeeded => response.message.yellow(),
        ResultKind::Cancelled => response.message.bright_black(),
        ResultKind::NotUnderstood => response.message.red(),
        ResultKind::Informational => response.message.bright_blue(),
    };
    println!("{}", message);

    if let Some(order) = &response.staged_order {
        for line in order.lines() {
            println!(
                "  {}",
                format!("- {} x {} @ {}", line.quantity, line.name, line.unit_price).yellow()
            );
        }
    }

    for item in &response.menu_items {
        println!(
            "  {}",
            format!(
                "- {} ({}, {:.1}★)",
                item.localized_name(language),
                item.price,
                item.rating
            )
            .bright_blue()
        );
    }

    for suggestion in &response.suggestions {
        println!("  {}", format!("e.g. \"{}\"", suggestion).bright_black());
    }

    if response.requires_confirmation {
        println!("{}", "Reply /confirm or /cancel".bright_black());
    }
}

pub fn confirmation(result: &ConfirmationResult) {
    match result {
        ConfirmationResult::Confirmed { message, .. } => println!("{}", message.bright_green()),
        ConfirmationResult::Cancelled { message, .. } => println!("{}", message.bright_black()),
    }
}

pub fn restaurants(found: &[Distanced<Restaurant>]) {
    if found.is_empty() {
        println!("{}", "No restaurants nearby.".yellow());
        return;
    }
    for restaurant in found {
        println!(
            "{}",
            format!(
                "- {} [{}] {:.2} km",
                restaurant.item.name,
                restaurant.item.id,
                restaurant.display_distance_km()
            )
            .bright_blue()
        );
    }
}

pub fn error(err: &dyn std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", err).red());
}
