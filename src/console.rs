//! Pretty terminal output with colors and badges.

use colored::Colorize;

// === Startup ===

const BANNER_INNER: usize = 59;
const BANNER_TITLE: &str = "loginstore v0.1.0";
const BANNER_TAGLINE: &str = "Credential intake to a document store";

fn banner_edge(left: char, fill: char, right: char) -> String {
    format!("{}{}{}", left, fill.to_string().repeat(BANNER_INNER), right)
}

fn banner_row(text: &str) -> String {
    format!("║     {:<width$}║", text, width = BANNER_INNER - 5)
}

pub fn print_banner() {
    println!();
    println!("{}", banner_edge('╔', '═', '╗').cyan());
    println!("{}", banner_row("").cyan());
    println!("{}", banner_row(BANNER_TITLE).bold().white());
    println!("{}", banner_row(BANNER_TAGLINE).dimmed());
    println!("{}", banner_row("").cyan());
    println!("{}", banner_edge('╚', '═', '╝').cyan());
    println!();
}

pub fn print_startup(addr: &str, backend: Option<&str>, password_policy: &str) {
    println!("{} {}", "✓".green().bold(), "Server ready".white().bold());
    println!("  {} {}", "→".dimmed(), format!("http://{}", addr).cyan().underline());
    match backend {
        Some(name) => println!("  {} {} {}", "→".dimmed(), "store:".dimmed(), name.green()),
        None => println!(
            "  {} {} {}",
            "→".dimmed(),
            "store:".dimmed(),
            "unavailable, /save will answer 503".red()
        ),
    }
    println!("  {} {} {}", "→".dimmed(), "passwords:".dimmed(), password_policy.white());
    println!();
    println!("{}", "Endpoints:".white().bold());
    println!("  {} {}     {}", "POST".yellow(), "/save".white(), "Store login data".dimmed());
    println!("  {} {}   {}", "GET ".green(), "/health".white(), "Store readiness".dimmed());
    println!("  {} {}  {}", "GET ".green(), "/metrics".white(), "Telemetry".dimmed());
    println!();
}

// === Badges ===

fn badge(text: &str, fg: colored::Color, bg: colored::Color) -> colored::ColoredString {
    format!(" {} ", text).color(fg).on_color(bg).bold()
}

// === Core Events ===

pub fn log_stored(email: &str, backend: &str) {
    println!(
        "{} {} {} {}",
        badge("SAVE", colored::Color::Black, colored::Color::Green),
        "email:".dimmed(), email.white(),
        format!("→ {}", backend).dimmed()
    );
}

pub fn log_rejected(reason: &str) {
    println!("{} {}", badge("REJECT", colored::Color::Black, colored::Color::Yellow), reason.yellow());
}

pub fn log_unavailable() {
    println!(
        "{} {}",
        badge("NO STORE", colored::Color::White, colored::Color::Red),
        "write refused, storage unavailable".red()
    );
}

pub fn log_store_failure(reason: &str) {
    println!("{} {}", badge("FAIL", colored::Color::White, colored::Color::Red), reason.red());
}

pub fn log_store_down(redacted_uri: &str, reason: &str) {
    println!(
        "{} {} {} {}",
        badge("STORE", colored::Color::White, colored::Color::Red),
        redacted_uri.yellow(),
        "unreachable:".dimmed(),
        reason.red()
    );
}
