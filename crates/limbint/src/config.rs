//! Command-line configuration.

use clap::Parser;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "LIMBCALC_LOG";

/// limbcalc: reverse-Polish calculator over arbitrary-precision integers.
///
/// Tokens are decimal integers or operators:
/// `+ - * / % & | ^ << >> neg ~ inc dec dup swap`.
/// With no tokens on the command line, they are read from stdin.
#[derive(Parser, Debug, Default)]
#[command(name = "limbcalc", version, about, allow_negative_numbers = true)]
pub struct AppConfig {
    /// Expression tokens in reverse-Polish order.
    #[arg(allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Print the whole stack, bottom first, instead of only the top.
    #[arg(short, long)]
    pub stack: bool,

    /// Log evaluation steps (overridden by LIMBCALC_LOG).
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
