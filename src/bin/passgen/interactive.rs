//! Prompt-driven password generation.

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect};

use passgen::password_generation::{parse_length, GenerationError};
use passgen::{CharacterPool, PoolSelection};

use crate::config::Config;
use crate::render::Meter;
use crate::ProgError;

pub(crate) fn run(config: &Config) -> Result<(), ProgError> {
    let theme = ColorfulTheme::default();
    let mut selection = config.selection();
    let mut length = config.length;

    loop {
        selection = select_pools(&theme, &selection)?;
        if selection.is_empty() {
            eprintln!(
                "Please select at least one option (Uppercase, Lowercase, Numbers, or Symbols)."
            );
            continue;
        }

        let raw_length: String = Input::with_theme(&theme)
            .with_prompt("Length")
            .default(length.to_string())
            .validate_with(|input: &String| -> Result<(), GenerationError> {
                parse_length(input).map(|_| ())
            })
            .interact_text()
            .context("failed to query the password length")?;
        length = parse_length(&raw_length)?;
        log::debug!(
            "generating a password of length {} from {:?}",
            length,
            selection.pools().collect::<Vec<_>>()
        );

        match crate::commands::generate_one(&selection, length) {
            Ok(generated) => {
                println!();
                println!("  {}", generated.password.as_str());
                println!(
                    "  {}",
                    Meter {
                        strength: generated.strength,
                        entropy_bits: Some(generated.entropy_bits),
                    }
                );
                println!();

                let copy = config.copy
                    || Confirm::with_theme(&theme)
                        .with_prompt("Copy to the clipboard?")
                        .default(false)
                        .interact()
                        .context("failed to prompt you, somehow")?;
                if copy {
                    crate::clipboard::copy_or_warn(generated.password.as_str());
                }
            }
            // Recoverable by answering the prompts differently.
            Err(ProgError::Generation(err)) => {
                eprintln!("{}", err);
                continue;
            }
            Err(err) => return Err(err),
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Generate another?")
            .default(true)
            .interact()
            .context("failed to prompt you, somehow")?;
        if !again {
            return Ok(());
        }
    }
}

fn select_pools(theme: &ColorfulTheme, current: &PoolSelection) -> Result<PoolSelection, ProgError> {
    let defaults = CharacterPool::ALL.map(|pool| current.is_selected(pool));
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Character types (space to toggle, enter to confirm)")
        .items(&CharacterPool::ALL)
        .defaults(&defaults)
        .interact_opt()
        .context("failed to query your selection")?
        .ok_or(ProgError::PromptCancelled)?;
    Ok(chosen.into_iter().map(|idx| CharacterPool::ALL[idx]).collect())
}
