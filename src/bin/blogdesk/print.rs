#![deny(clippy::all, clippy::pedantic)]

use askama::Template;
use blogdesk::presentation::views::render_template;
use serde::Serialize;

use crate::context::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}

pub fn print_html<T: Template>(template: &T) -> Result<(), CliError> {
    let out = render_template(template)?;
    println!("{out}");
    Ok(())
}

pub fn print_line(text: &str) {
    println!("{text}");
}
