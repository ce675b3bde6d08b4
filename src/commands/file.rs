use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde_json::json;

use helperkit::files;

use super::{helper_output, CmdResult, HelperOutput};

#[derive(Args)]
pub struct FileArgs {
    #[command(subcommand)]
    command: FileCommand,
}

#[derive(Subcommand)]
enum FileCommand {
    /// Extension and base name without extension
    Name { filename: String },
    /// Check a file name's extension against an allow list
    AllowedType {
        filename: String,
        /// Allowed extensions, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        allow: Vec<String>,
    },
    /// Check a byte count against a limit in kilobytes
    AllowedSize { bytes: u64, max_kb: u64 },
    /// Human-readable size for a byte count
    HumanSize { bytes: u64 },
    /// Size of a file on disk
    Size { path: PathBuf },
    /// Generate a storage name for an upload
    UploadName {
        original: String,
        /// Use this name instead of generating one
        #[arg(long)]
        name: Option<String>,
        /// Only accept image extensions
        #[arg(long)]
        image: bool,
    },
}

pub fn run(args: FileArgs) -> CmdResult<HelperOutput> {
    match args.command {
        FileCommand::Name { filename } => helper_output(
            "file.name",
            json!({
                "extension": files::extension(&filename),
                "stem": files::name_without_extension(&filename),
            }),
        ),
        FileCommand::AllowedType { filename, allow } => {
            let allowed: Vec<&str> = allow.iter().map(String::as_str).collect();
            helper_output(
                "file.allowed-type",
                json!({ "valid": files::is_allowed_type(&filename, &allowed) }),
            )
        }
        FileCommand::AllowedSize { bytes, max_kb } => helper_output(
            "file.allowed-size",
            json!({ "valid": files::is_allowed_size(bytes, max_kb) }),
        ),
        FileCommand::HumanSize { bytes } => {
            helper_output("file.human-size", files::human_size(bytes))
        }
        FileCommand::Size { path } => {
            let bytes = files::file_size(&path)?;
            helper_output(
                "file.size",
                json!({
                    "path": path.display().to_string(),
                    "bytes": bytes,
                    "human": files::human_size(bytes),
                }),
            )
        }
        FileCommand::UploadName {
            original,
            name,
            image,
        } => {
            let generated = if image {
                files::image_upload_file_name(&original, name.as_deref())?
            } else {
                files::upload_file_name(&original, name.as_deref())
            };
            helper_output("file.upload-name", generated)
        }
    }
}
