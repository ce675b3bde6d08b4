use clap::{Args, Subcommand};

use helperkit::arithmetic;

use super::{helper_output, CmdResult, HelperOutput};

#[derive(Args)]
pub struct MathArgs {
    #[command(subcommand)]
    command: MathCommand,
}

#[derive(Subcommand)]
enum MathCommand {
    /// Apply sum, subtract, multiply or divide to two operands
    #[command(allow_negative_numbers = true)]
    Calc {
        a: String,
        /// sum | subtract | multiply | divide
        operation: String,
        b: String,
        /// Use floating-point arithmetic instead of integers
        #[arg(long)]
        float: bool,
    },
    /// amount * percent / 100
    #[command(allow_negative_numbers = true)]
    Percentage { amount: f64, percent: f64 },
    /// Percentage of an amount, optionally rounded
    #[command(allow_negative_numbers = true)]
    Commission {
        amount: f64,
        percent: f64,
        /// Decimal places to round to
        #[arg(long)]
        round: Option<u32>,
    },
    /// Format a number with grouping and fixed decimals
    #[command(allow_negative_numbers = true)]
    Format {
        number: f64,
        #[arg(long, default_value_t = 2)]
        decimals: u32,
        #[arg(long, default_value = ".")]
        dec_point: String,
        #[arg(long, default_value = ",")]
        thousands_sep: String,
    },
    /// Random integer in [min, max]
    #[command(allow_negative_numbers = true)]
    RandomInt { min: i64, max: i64 },
    /// Random float between min and max
    #[command(allow_negative_numbers = true)]
    RandomFloat { min: f64, max: f64 },
}

pub fn run(args: MathArgs) -> CmdResult<HelperOutput> {
    match args.command {
        MathCommand::Calc {
            a,
            operation,
            b,
            float,
        } => {
            if float {
                let value = arithmetic::calculate_float(a, b, &operation)?;
                helper_output("math.calc", value)
            } else {
                let value = arithmetic::calculate(a, b, &operation)?;
                helper_output("math.calc", value)
            }
        }
        MathCommand::Percentage { amount, percent } => {
            helper_output("math.percentage", arithmetic::percentage(amount, percent))
        }
        MathCommand::Commission {
            amount,
            percent,
            round,
        } => helper_output(
            "math.commission",
            arithmetic::commission(amount, percent, round),
        ),
        MathCommand::Format {
            number,
            decimals,
            dec_point,
            thousands_sep,
        } => helper_output(
            "math.format",
            arithmetic::format_number(number, decimals, &dec_point, &thousands_sep),
        ),
        MathCommand::RandomInt { min, max } => {
            helper_output("math.random-int", arithmetic::random_int(min, max)?)
        }
        MathCommand::RandomFloat { min, max } => {
            helper_output("math.random-float", arithmetic::random_float(min, max))
        }
    }
}
