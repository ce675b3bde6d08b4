use clap::{Args, Subcommand};
use serde_json::{json, Value};

use helperkit::arrays::{self, SortKey};

use super::{helper_output, parse_value, read_json_input, read_json_list, CmdResult, HelperOutput};

#[derive(Args)]
pub struct ArrayArgs {
    #[command(subcommand)]
    command: ArrayCommand,
}

// INPUT is JSON text, @file, or - for stdin.
#[derive(Subcommand)]
enum ArrayCommand {
    /// Read a value by dot path
    Get {
        input: String,
        path: String,
        /// Returned when the path is missing or null
        #[arg(long)]
        default: Option<String>,
    },
    /// Write a value by dot path and print the updated document
    Set {
        input: String,
        path: String,
        /// JSON literal, or plain text
        value: String,
    },
    /// Remove a value by dot path and print the updated document
    Remove { input: String, path: String },
    /// Group records by a field
    GroupBy { input: String, key: String },
    /// Collapse nested arrays and objects into one level
    Flatten { input: String },
    /// Collect one field from every record
    Pluck { input: String, key: String },
    /// Drop repeated values
    Unique { input: String },
    /// Sort records by one or more fields
    Sort {
        input: String,
        /// field or field:desc, repeatable; earlier keys take priority
        #[arg(long = "by", required = true)]
        by: Vec<String>,
    },
    /// Split into chunks of a given size
    Chunk { input: String, size: usize },
    /// Shuffle elements
    Shuffle { input: String },
    /// Pick random elements
    Random {
        input: String,
        /// Number of distinct elements; one element when omitted
        #[arg(long)]
        count: Option<usize>,
    },
    /// Records whose field equals a value
    Filter {
        input: String,
        key: String,
        /// JSON literal, or plain text
        value: String,
    },
    /// First element (or first object value)
    First { input: String },
    /// Last element (or last object value)
    Last { input: String },
    /// Whether an object has non-sequential keys
    IsAssoc { input: String },
}

pub fn run(args: ArrayArgs) -> CmdResult<HelperOutput> {
    match args.command {
        ArrayCommand::Get {
            input,
            path,
            default,
        } => {
            let root = read_json_input(&input)?;
            let default = default.as_deref().map(parse_value).unwrap_or(Value::Null);
            helper_output("array.get", arrays::dot_get(&root, &path, &default))
        }
        ArrayCommand::Set { input, path, value } => {
            let mut root = read_json_input(&input)?;
            arrays::dot_set(&mut root, &path, parse_value(&value))?;
            helper_output("array.set", root)
        }
        ArrayCommand::Remove { input, path } => {
            let mut root = read_json_input(&input)?;
            let removed = arrays::dot_remove(&mut root, &path);
            helper_output("array.remove", json!({ "removed": removed, "document": root }))
        }
        ArrayCommand::GroupBy { input, key } => {
            let items = read_json_list(&input)?;
            helper_output("array.group-by", arrays::group_by(&items, &key))
        }
        ArrayCommand::Flatten { input } => {
            let root = read_json_input(&input)?;
            helper_output("array.flatten", arrays::flatten(&root))
        }
        ArrayCommand::Pluck { input, key } => {
            let items = read_json_list(&input)?;
            helper_output("array.pluck", arrays::pluck(&items, &key))
        }
        ArrayCommand::Unique { input } => {
            let items = read_json_list(&input)?;
            helper_output("array.unique", arrays::unique(&items))
        }
        ArrayCommand::Sort { input, by } => {
            let items = read_json_list(&input)?;
            let keys = by
                .iter()
                .map(|spec| spec.parse::<SortKey>())
                .collect::<helperkit::Result<Vec<_>>>()?;
            helper_output("array.sort", arrays::sort_by_keys(&items, &keys))
        }
        ArrayCommand::Chunk { input, size } => {
            let items = read_json_list(&input)?;
            helper_output("array.chunk", arrays::chunk(&items, size)?)
        }
        ArrayCommand::Shuffle { input } => {
            let items = read_json_list(&input)?;
            helper_output("array.shuffle", arrays::shuffle(&items))
        }
        ArrayCommand::Random { input, count } => {
            let items = read_json_list(&input)?;
            match count {
                Some(count) => helper_output("array.random", arrays::random_many(&items, count)),
                None => helper_output("array.random", arrays::random_one(&items)),
            }
        }
        ArrayCommand::Filter { input, key, value } => {
            let items = read_json_list(&input)?;
            helper_output(
                "array.filter",
                arrays::filter_by_value(&items, &key, &parse_value(&value)),
            )
        }
        ArrayCommand::First { input } => {
            let root = read_json_input(&input)?;
            helper_output("array.first", arrays::first(&root))
        }
        ArrayCommand::Last { input } => {
            let root = read_json_input(&input)?;
            helper_output("array.last", arrays::last(&root))
        }
        ArrayCommand::IsAssoc { input } => {
            let root = read_json_input(&input)?;
            helper_output(
                "array.is-assoc",
                json!({ "associative": arrays::is_associative(&root) }),
            )
        }
    }
}
