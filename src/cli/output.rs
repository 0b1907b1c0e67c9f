//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the L.A.R.A CLI.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the L.A.R.A banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
"#,
                " _        _    ____      _    ".bright_cyan().bold(),
                "| |      / \\  |  _ \\    / \\   ".bright_cyan().bold(),
                "| |___  / _ \\ | |_) |  / _ \\  ".cyan().bold(),
                "|_____|/_/ \\_\\|_| \\_\\ /_/ \\_\\ ".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Local Augmented Retrieval Assistant".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 _        _    ____      _
| |      / \  |  _ \    / \
| |___  / _ \ | |_) |  / _ \
|_____|/_/ \_\|_| \_\ /_/ \_\

   Local Augmented Retrieval Assistant v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }
}
