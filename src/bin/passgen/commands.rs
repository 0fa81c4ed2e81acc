//! The non-interactive commands: generating passwords and scoring one.

use std::io::{self, Write};

use anyhow::Context;
use serde::Serialize;
use zeroize::Zeroize;

use passgen::password_generation::{entropy_bits, generate_password};
use passgen::strength::{self, Strength};
use passgen::{PoolSelection, Secret};

use crate::config::Config;
use crate::render::Meter;
use crate::{GenerateArgs, ProgError};

/// A generated password together with its assessment.
#[derive(Serialize)]
pub(crate) struct Generated {
    pub password: Secret,
    pub strength: Strength,
    pub entropy_bits: f64,
}

impl crate::table::TableDisplay for Generated {
    fn columns() -> usize {
        3
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "Password",
            1 => "Strength",
            2 => "Entropy (bits)",
            _ => panic!(),
        }
    }

    fn cell(&self, column_index: usize) -> String {
        match column_index {
            0 => self.password.as_str().to_owned(),
            1 => format!("{} ({})", self.strength.label(), self.strength.level()),
            2 => format!("{:.0}", self.entropy_bits),
            _ => panic!(),
        }
    }
}

/// Resolve the pool selection: explicit flags win; with no flags, fall back to the configuration.
pub(crate) fn resolve_selection(args: &GenerateArgs, config: &Config) -> PoolSelection {
    let from_flags = PoolSelection {
        uppercase: args.uppercase,
        lowercase: args.lowercase,
        digits: args.digits,
        symbols: args.symbols,
    };
    if from_flags.is_empty() {
        config.selection()
    } else {
        from_flags
    }
}

pub(crate) fn generate_one(
    selection: &PoolSelection,
    length: usize,
) -> Result<Generated, ProgError> {
    let mut rng = rand::thread_rng();
    let password = generate_password(&mut rng, selection, length)?;
    let strength = strength::score(password.as_str());
    Ok(Generated {
        password,
        strength,
        entropy_bits: entropy_bits(selection, length),
    })
}

pub(crate) fn generate(args: GenerateArgs, config: &Config) -> Result<(), ProgError> {
    let selection = resolve_selection(&args, config);
    let length = args.length.unwrap_or(config.length);
    let count = args.count.unwrap_or(1);
    log::debug!(
        "generating {} password(s) of length {} from {:?}",
        count,
        length,
        selection.pools().collect::<Vec<_>>()
    );

    let generated = (0..count)
        .map(|_| generate_one(&selection, length))
        .collect::<Result<Vec<_>, _>>()?;

    {
        let mut stdout = io::stdout().lock();
        if args.json {
            let written = match generated.as_slice() {
                [single] => serde_json::to_writer_pretty(&mut stdout, single),
                all => serde_json::to_writer_pretty(&mut stdout, all),
            };
            written.context("failed to write JSON to stdout")?;
            writeln!(stdout).context("failed to write to stdout")?;
        } else if args.quiet {
            for g in &generated {
                writeln!(stdout, "{}", g.password.as_str()).context("failed to write to stdout")?;
            }
        } else if count == 1 {
            let g = &generated[0];
            writeln!(stdout, "{}", g.password.as_str()).context("failed to write to stdout")?;
            writeln!(
                stdout,
                "{}",
                Meter {
                    strength: g.strength,
                    entropy_bits: Some(g.entropy_bits),
                }
            )
            .context("failed to write to stdout")?;
        } else {
            crate::table::display_table(&generated, &mut stdout)
                .context("failed to output table")?;
        }
    }

    if args.copy || config.copy {
        let mut joined = generated
            .iter()
            .map(|g| g.password.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        crate::clipboard::copy_or_warn(&joined);
        joined.zeroize();
    }
    Ok(())
}

pub(crate) fn score(password: Option<String>) -> Result<(), ProgError> {
    let password = match password {
        Some(p) => Secret::from(p),
        None => Secret::from(
            dialoguer::Password::new()
                .with_prompt("Password to score")
                .allow_empty_password(true)
                .interact()
                .context("failed to read password from TTY")?,
        ),
    };
    let strength = strength::score(password.as_str());
    println!(
        "{}",
        Meter {
            strength,
            entropy_bits: None,
        }
    );
    Ok(())
}
