use clap::{Parser, Subcommand};

mod commands;

use commands::{api, array, config, date, error, file, math, string, validate};
use helperkit::output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "helperkit")]
#[command(version = VERSION)]
#[command(about = "Stateless helpers for validation, strings, arrays, arithmetic and dates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// String transforms (slug, mask, truncate, case conversion, random tokens)
    Str(string::StringArgs),
    /// Field validators
    Validate(validate::ValidateArgs),
    /// Arithmetic helpers
    Math(math::MathArgs),
    /// JSON collection helpers (dot paths, grouping, flattening, sorting)
    Array(array::ArrayArgs),
    /// Date helpers
    Date(date::DateArgs),
    /// File-name and size helpers
    File(file::FileArgs),
    /// Send a JSON HTTP request
    Api(api::ApiArgs),
    /// Manage global helperkit configuration
    Config(config::ConfigArgs),
    /// Inspect error codes
    Error(error::ErrorArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = commands::run_json(cli.command);

    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
