//! Rendering of the strength meter.

use std::fmt::{self, Display};

use console::Style;

use passgen::strength::{Strength, METER_BARS};

/// A four-bar strength meter followed by its label, e.g. `███░ MEDIUM (3/4)`.
pub(crate) struct Meter {
    pub strength: Strength,
    /// Entropy estimate to show after the label, if known.
    pub entropy_bits: Option<f64>,
}

fn style_for(strength: Strength) -> Style {
    match strength {
        Strength::Strong => Style::new().green(),
        Strength::Medium => Style::new().yellow(),
        Strength::Empty | Strength::VeryWeak | Strength::Weak => Style::new().red(),
    }
}

impl Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = style_for(self.strength);
        let filled = self.strength.filled_bars();
        write!(f, "{}", style.apply_to("█".repeat(filled)))?;
        write!(
            f,
            "{}",
            Style::new().dim().apply_to("░".repeat(METER_BARS - filled))
        )?;
        write!(
            f,
            " {} ({}/{})",
            style.clone().bold().apply_to(self.strength.label()),
            self.strength.level(),
            METER_BARS
        )?;
        if let Some(bits) = self.entropy_bits {
            write!(f, ", ~{:.0} bits of entropy", bits)?;
        }
        Ok(())
    }
}
