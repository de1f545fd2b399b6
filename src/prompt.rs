//! Operator prompts: template selection and recipient name input.
//! Selection re-prompts indefinitely on invalid input; bounds checking lives
//! in `parse_selection` so it stays testable without a terminal.

use crate::config::{CertificateTemplate, Config};
use anyhow::{Context, Result};
use dialoguer::Input;
use log::info;
use std::fs;

const NAME_LIST_PATH: &str = "list.txt";

/// Prints the numbered template menu (1-based, matching what the selection
/// prompt accepts).
pub fn display_templates(config: &Config) {
    println!("Available certificate templates:");
    for (i, template) in config.certificates.iter().enumerate() {
        println!("  {}. {}", i + 1, template.name);
    }
}

/// Validates a menu entry against the template count. Accepts exactly the
/// integers 1..=count and returns the 0-based index.
pub fn parse_selection(input: &str, count: usize) -> std::result::Result<usize, String> {
    let message = format!("enter a number between 1 and {}", count);
    let choice: usize = input.trim().parse().map_err(|_| message.clone())?;
    if choice < 1 || choice > count {
        return Err(message);
    }
    Ok(choice - 1)
}

/// Prompts until a valid template number is entered.
pub fn select_template(config: &Config) -> Result<&CertificateTemplate> {
    loop {
        let raw: String = Input::new()
            .with_prompt("Template number")
            .interact_text()
            .context("Failed to read selection from the terminal")?;

        match parse_selection(&raw, config.certificates.len()) {
            Ok(index) => return Ok(&config.certificates[index]),
            Err(message) => eprintln!("{}", message),
        }
    }
}

/// Prompts for a recipient name. The literal token `list` switches to batch
/// mode and reads one name per line from list.txt, skipping blank lines.
pub fn read_names() -> Result<Vec<String>> {
    let input: String = Input::new()
        .with_prompt("Recipient name (or 'list' to read names from list.txt)")
        .interact_text()
        .context("Failed to read name from the terminal")?;

    if input.trim().eq_ignore_ascii_case("list") {
        let content = fs::read_to_string(NAME_LIST_PATH)
            .with_context(|| format!("Failed to read {}", NAME_LIST_PATH))?;
        let names: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        info!("read {} names from {}", names.len(), NAME_LIST_PATH);
        Ok(names)
    } else {
        Ok(vec![input.trim().to_string()])
    }
}

// *************** Tests ***************

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_accepts_full_range() {
        assert_eq!(parse_selection("1", 3), Ok(0));
        assert_eq!(parse_selection("2", 3), Ok(1));
        assert_eq!(parse_selection("3", 3), Ok(2));
    }

    #[test]
    fn test_parse_selection_trims_whitespace() {
        assert_eq!(parse_selection("  2  ", 3), Ok(1));
    }

    #[test]
    fn test_parse_selection_rejects_zero() {
        assert!(parse_selection("0", 3).is_err());
    }

    #[test]
    fn test_parse_selection_rejects_out_of_range() {
        assert!(parse_selection("4", 3).is_err());
    }

    #[test]
    fn test_parse_selection_rejects_non_numeric() {
        assert!(parse_selection("two", 3).is_err());
        assert!(parse_selection("1.5", 3).is_err());
        assert!(parse_selection("-1", 3).is_err());
    }

    #[test]
    fn test_parse_selection_rejects_empty() {
        assert!(parse_selection("", 3).is_err());
        assert!(parse_selection("   ", 3).is_err());
    }

    #[test]
    fn test_parse_selection_message_names_bounds() {
        let message = parse_selection("99", 5).unwrap_err();
        assert!(message.contains("1"));
        assert!(message.contains("5"));
    }
}
