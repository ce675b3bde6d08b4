use clap::{Args, Subcommand};
use serde::Serialize;

use helperkit::dates::DEFAULT_DATE_FORMAT;
use helperkit::defaults;
use helperkit::validator;

use super::{helper_output, CmdResult, HelperOutput};

#[derive(Args)]
pub struct ValidateArgs {
    #[command(subcommand)]
    command: ValidateCommand,
}

#[derive(Subcommand)]
enum ValidateCommand {
    /// Email address
    Email { value: String },
    /// Absolute URL
    Url { value: String },
    /// IPv4 or IPv6 address
    Ip { value: String },
    /// Phone number (E.164-like by default)
    Phone {
        value: String,
        /// Custom regex pattern
        #[arg(long, conflicts_with = "country")]
        pattern: Option<String>,
        /// Country-specific format (US, CA, UK)
        #[arg(long)]
        country: Option<String>,
    },
    /// Credit card number (Luhn checksum)
    CreditCard { value: String },
    /// Password against the configured policy
    Password {
        value: String,
        /// Override the minimum length
        #[arg(long)]
        min_length: Option<usize>,
        /// Also require a special character
        #[arg(long)]
        require_special: bool,
    },
    /// Postal code
    Postal {
        value: String,
        #[arg(long, default_value = "US")]
        country: String,
        /// Fail on countries without a known format instead of accepting
        #[arg(long)]
        strict: bool,
    },
    /// Canonical base64
    Base64 { value: String },
    /// Letters and whitespace only
    Alpha { value: String },
    /// Letters and digits only
    Alphanumeric { value: String },
    /// Digits only
    Numeric { value: String },
    /// Length in characters within inclusive bounds
    Length {
        value: String,
        #[arg(long, default_value_t = 0)]
        min: usize,
        #[arg(long)]
        max: usize,
    },
    /// Number within inclusive bounds
    #[command(allow_negative_numbers = true)]
    Range {
        value: f64,
        #[arg(long)]
        min: f64,
        #[arg(long)]
        max: f64,
    },
    /// Date string matching a strftime format exactly
    Date {
        value: String,
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        format: String,
    },
}

#[derive(Debug, Serialize)]
pub struct Verdict {
    pub valid: bool,
}

fn verdict(command: &str, valid: bool) -> CmdResult<HelperOutput> {
    helper_output(command, Verdict { valid })
}

pub fn run(args: ValidateArgs) -> CmdResult<HelperOutput> {
    match args.command {
        ValidateCommand::Email { value } => {
            verdict("validate.email", validator::is_valid_email(&value))
        }
        ValidateCommand::Url { value } => verdict("validate.url", validator::is_valid_url(&value)),
        ValidateCommand::Ip { value } => verdict("validate.ip", validator::is_valid_ip(&value)),
        ValidateCommand::Phone {
            value,
            pattern,
            country,
        } => {
            let valid = match country {
                Some(country) => validator::is_valid_phone_for_country(&value, &country),
                None => validator::is_valid_phone(&value, pattern.as_deref()),
            };
            verdict("validate.phone", valid)
        }
        ValidateCommand::CreditCard { value } => {
            verdict("validate.credit-card", validator::is_valid_credit_card(&value))
        }
        ValidateCommand::Password {
            value,
            min_length,
            require_special,
        } => {
            let mut policy = defaults::load_defaults().password;
            if let Some(min_length) = min_length {
                policy.min_length = min_length;
            }
            if require_special {
                policy.require_special = true;
            }
            helper_output(
                "validate.password",
                validator::validate_password(&value, &policy),
            )
        }
        ValidateCommand::Postal {
            value,
            country,
            strict,
        } => {
            let valid = if strict {
                validator::check_postal_code(&value, &country)?
            } else {
                validator::is_valid_postal_code(&value, &country)
            };
            verdict("validate.postal", valid)
        }
        ValidateCommand::Base64 { value } => {
            verdict("validate.base64", validator::is_valid_base64(&value))
        }
        ValidateCommand::Alpha { value } => {
            verdict("validate.alpha", validator::is_alpha_only(&value))
        }
        ValidateCommand::Alphanumeric { value } => {
            verdict("validate.alphanumeric", validator::is_alphanumeric(&value))
        }
        ValidateCommand::Numeric { value } => {
            verdict("validate.numeric", validator::is_numeric(&value))
        }
        ValidateCommand::Length { value, min, max } => {
            verdict("validate.length", validator::is_valid_length(&value, min, max))
        }
        ValidateCommand::Range { value, min, max } => {
            verdict("validate.range", validator::is_valid_range(value, min, max))
        }
        ValidateCommand::Date { value, format } => {
            verdict("validate.date", validator::is_valid_date_format(&value, &format))
        }
    }
}
