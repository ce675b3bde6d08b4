use clap::{Args, Subcommand};
use serde_json::json;

use helperkit::defaults;
use helperkit::strings::{self, MaskSpec};

use super::{helper_output, CmdResult, HelperOutput};

#[derive(Args)]
pub struct StringArgs {
    #[command(subcommand)]
    command: StringCommand,
}

#[derive(Subcommand)]
enum StringCommand {
    /// Convert text to a URL slug
    Slug {
        value: String,
        /// Word separator (default from config, usually "-")
        #[arg(long)]
        separator: Option<String>,
    },
    /// Mask everything between the leading and trailing visible windows
    Mask {
        value: String,
        /// Characters kept at the front
        #[arg(long)]
        start: Option<usize>,
        /// Characters kept at the end
        #[arg(long)]
        visible: Option<usize>,
        /// Placeholder character
        #[arg(long)]
        mask_char: Option<char>,
    },
    /// Mask an email address, keeping the last two characters of the local part
    MaskEmail { email: String },
    /// Generate a random string
    Random {
        #[arg(long)]
        length: Option<usize>,
        /// Characters to draw from
        #[arg(long)]
        alphabet: Option<String>,
    },
    /// Generate a numeric one-time password
    Otp {
        #[arg(long)]
        length: Option<usize>,
    },
    /// Cut text to a number of characters and append a suffix
    Truncate {
        value: String,
        #[arg(long)]
        length: Option<usize>,
        #[arg(long)]
        suffix: Option<String>,
    },
    /// Keep the first N words
    LimitWords {
        value: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "...")]
        end: String,
    },
    /// camelCase to snake_case
    CamelToSnake { value: String },
    /// snake_case to CamelCase
    SnakeToCamel { value: String },
    /// Initials of a name
    Initials { name: String },
    /// Check whether text is valid JSON
    IsJson { value: String },
    /// List http(s) URLs found in text
    ExtractUrls { value: String },
    /// Remove http(s) URLs from text
    RemoveUrls { value: String },
    /// Remove HTML tags
    StripHtml { value: String },
}

pub fn run(args: StringArgs) -> CmdResult<HelperOutput> {
    let defaults = defaults::load_defaults();

    match args.command {
        StringCommand::Slug { value, separator } => {
            let separator = separator.unwrap_or(defaults.slug_separator);
            helper_output("str.slug", strings::slug(&value, &separator))
        }
        StringCommand::Mask {
            value,
            start,
            visible,
            mask_char,
        } => {
            let spec = MaskSpec::new(
                start.unwrap_or(defaults.mask.start),
                visible.unwrap_or(defaults.mask.visible_length),
                mask_char.unwrap_or(defaults.mask.mask_char),
            );
            helper_output("str.mask", strings::mask(&value, &spec))
        }
        StringCommand::MaskEmail { email } => {
            helper_output("str.mask-email", strings::mask_email(&email))
        }
        StringCommand::Random { length, alphabet } => {
            let length = length.unwrap_or(defaults.random_string_length);
            let alphabet = alphabet.as_deref().unwrap_or(strings::DEFAULT_ALPHABET);
            helper_output("str.random", strings::random_string(length, alphabet)?)
        }
        StringCommand::Otp { length } => {
            let length = length.unwrap_or(defaults.otp_length);
            helper_output("str.otp", strings::generate_otp(length))
        }
        StringCommand::Truncate {
            value,
            length,
            suffix,
        } => {
            let length = length.unwrap_or(defaults.truncate.length);
            let suffix = suffix.unwrap_or(defaults.truncate.suffix);
            helper_output("str.truncate", strings::truncate(&value, length, &suffix))
        }
        StringCommand::LimitWords { value, limit, end } => {
            helper_output("str.limit-words", strings::limit_words(&value, limit, &end))
        }
        StringCommand::CamelToSnake { value } => {
            helper_output("str.camel-to-snake", strings::camel_to_snake(&value))
        }
        StringCommand::SnakeToCamel { value } => {
            helper_output("str.snake-to-camel", strings::snake_to_camel(&value))
        }
        StringCommand::Initials { name } => helper_output("str.initials", strings::initials(&name)),
        StringCommand::IsJson { value } => {
            helper_output("str.is-json", json!({ "valid": strings::is_json(&value) }))
        }
        StringCommand::ExtractUrls { value } => {
            helper_output("str.extract-urls", strings::extract_urls(&value))
        }
        StringCommand::RemoveUrls { value } => {
            helper_output("str.remove-urls", strings::remove_urls(&value))
        }
        StringCommand::StripHtml { value } => {
            helper_output("str.strip-html", strings::strip_html(&value))
        }
    }
}
