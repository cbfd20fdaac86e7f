use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use std::str::FromStr;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for an optional string; empty input means skip
pub fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

    let trimmed = value.trim();
    Ok(if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    })
}

/// Prompt for an optional number; empty input means skip, anything
/// unparseable re-prompts
pub fn prompt_optional_number<T>(prompt: &str) -> Result<Option<T>>
where
    T: FromStr,
{
    loop {
        let input_str = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        let trimmed = input_str.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match trimmed.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => {
                eprintln!("Invalid input. Please enter a valid number.");
                continue;
            }
        }
    }
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt to pick one of `items`, returning the chosen index
pub fn prompt_select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}
