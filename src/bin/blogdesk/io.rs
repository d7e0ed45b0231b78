#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::args::PasswordArgs;
use crate::context::CliError;

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

/// The password file wins over `BLOGDESK_PASSWORD`. A trailing newline is stripped.
pub fn read_password(args: PasswordArgs) -> Result<String, CliError> {
    let raw = read_opt_value(args.password_env, args.password_file)?.ok_or_else(|| {
        CliError::InvalidInput("password required (use --password-file or BLOGDESK_PASSWORD)".into())
    })?;
    Ok(raw.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask a yes/no question on stderr. Anything other than "y" or "yes" is a no.
pub fn confirm(prompt: &str, input: &mut impl BufRead) -> Result<bool, CliError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ").map_err(|e| CliError::Output(e.to_string()))?;
    stderr.flush().map_err(|e| CliError::Output(e.to_string()))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
