use crate::chess::{DoubleStep, Rules};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Configuration for a [`Session`][`crate::session::Session`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, default)]
pub struct Options {
    /// The name of the person playing.
    #[cfg_attr(test, strategy("[A-Za-z][A-Za-z ]{0,15}"))]
    pub player: String,

    /// How many points each applied move is worth.
    #[cfg_attr(test, strategy(0u32..=100))]
    pub points: u32,

    /// Whether to show move hints for the selected piece.
    pub hints: bool,

    /// Which squares must be empty for a pawn's double step.
    pub double_step: DoubleStep,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            player: "Player".into(),
            points: 10,
            hints: true,
            double_step: DoubleStep::default(),
        }
    }
}

impl Options {
    /// The movement [`Rules`] these options call for.
    pub fn rules(&self) -> Rules {
        Rules {
            double_step: self.double_step,
        }
    }
}

/// Prints the options in [RON] notation.
///
/// [RON]: https://github.com/ron-rs/ron
impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`Options`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse session options")]
pub struct ParseOptionsError(ron::de::SpannedError);

impl FromStr for Options {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_options_is_an_identity(o: Options) {
        assert_eq!(o.to_string().parse(), Ok(o));
    }

    #[test]
    fn missing_fields_take_default_values() {
        assert_eq!("()".parse(), Ok(Options::default()));
        assert_eq!(
            "(player: \"Ana\", double_step: destination_only)".parse(),
            Ok(Options {
                player: "Ana".into(),
                double_step: DoubleStep::DestinationOnly,
                ..Options::default()
            })
        );
    }

    #[test]
    fn each_move_is_worth_ten_points_by_default() {
        assert_eq!(Options::default().points, 10);
    }

    #[proptest]
    fn parsing_options_fails_for_unknown_fields(#[strategy("[a-z]{12}")] field: String) {
        assert!(format!("({}: 1)", field).parse::<Options>().is_err());
    }

    #[proptest]
    fn rules_follow_double_step_option(o: Options) {
        assert_eq!(o.rules().double_step, o.double_step);
    }
}
