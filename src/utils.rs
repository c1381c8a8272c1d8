use colored::Colorize;

pub enum TagColor {
    Green,
    Red,
    Blue,
    Cyan,
}

/// Right-aligned colored `[TAG]` followed by the message, one line per
/// installer step.
pub fn print_message(tag: &str, message: &str, color: TagColor) {
    let tag = format!("[{tag}]");
    let tag = match color {
        TagColor::Green => tag.green(),
        TagColor::Red => tag.red(),
        TagColor::Blue => tag.blue(),
        TagColor::Cyan => tag.cyan(),
    };
    println!("{:>12} {message}", tag.bold());
}

pub fn print_title(title: &str) {
    println!("\n==== {} ====\n", title.bold());
}

pub fn print_banner(release: Option<&str>) {
    println!();
    println!("{}", "Ollama Installer".bold());
    match release {
        Some(release) => println!("Release: {}", release.cyan().bold()),
        None => println!("Release: {}", "latest local build".cyan()),
    }
    println!();
}

#[macro_export]
macro_rules! success_message {
    ($($arg:tt)*) => {
        $crate::utils::print_message("SUCCESS", &format!($($arg)*), $crate::utils::TagColor::Green)
    };
}
