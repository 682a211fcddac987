//! Named adjustment presets.
//!
//! | Preset   | brightness | contrast | saturation | sharpness |
//! |----------|-----------:|---------:|-----------:|----------:|
//! | Passport | 1.20       | 1.15     | 1.10       | 1.10      |
//! | Visa     | 1.30       | 1.20     | 1.05       | 1.15      |
//! | Bright   | 1.50       | 1.25     | 1.20       | 1.20      |
//! | Neutral  | 1.00       | 1.00     | 1.00       | 1.00      |
//!
//! `Passport` doubles as the load-time default, so [`Preset::Passport`]'s
//! params always equal [`AdjustmentParams::default`].

use crate::imaging::{AdjustmentParams, ParseError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Passport,
    Visa,
    Bright,
    Neutral,
}

impl Preset {
    /// Display order, matching the shell's button layout.
    pub const ALL: [Preset; 4] = [
        Preset::Passport,
        Preset::Visa,
        Preset::Bright,
        Preset::Neutral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Passport => "Passport",
            Preset::Visa => "Visa",
            Preset::Bright => "Bright",
            Preset::Neutral => "Neutral",
        }
    }

    pub fn params(self) -> AdjustmentParams {
        match self {
            Preset::Passport => AdjustmentParams::default(),
            Preset::Visa => AdjustmentParams::new(1.3, 1.2, 1.05, 1.15),
            Preset::Bright => AdjustmentParams::new(1.5, 1.25, 1.2, 1.2),
            Preset::Neutral => AdjustmentParams::identity(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ParseError;

    /// Case-insensitive match on the preset name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError {
                kind: "preset",
                name: s.to_string(),
            })
    }
}
