//! Command line tokenizer.
//!
//! A line is split into a verb, an optional first parameter and the rest of
//! the line. Verb and first parameter are matched ignoring ASCII case.

use winnow::ascii::{dec_int, multispace0};
use winnow::combinator::{eof, preceded, terminated};
use winnow::token::{rest, take_till};
use winnow::{Parser, Result};

use crate::error::CommandError;
use crate::motion::AxisSelector;

/// A parsed protocol command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Home both axes and recalibrate them.
    Home,
    /// Toggle the repeating homing loop.
    HomeLoop,
    /// Bounded relative move of one axis.
    MoveRelative {
        /// Target axis.
        axis: AxisSelector,
        /// Signed step delta.
        steps: i64,
    },
    /// Bounded absolute move of one axis.
    MoveAbsolute {
        /// Target axis.
        axis: AxisSelector,
        /// Target position in steps.
        position: i64,
    },
    /// Report both positions.
    GetPosition,
}

/// Raw tokens of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokens<'s> {
    /// First whitespace-delimited token.
    pub verb: &'s str,
    /// Second token, empty when absent.
    pub param1: &'s str,
    /// Remainder of the line with embedded whitespace kept.
    pub param2: &'s str,
}

impl<'s> Tokens<'s> {
    /// Split `line` into tokens. Never fails; missing tokens are empty.
    pub fn split(line: &'s str) -> Self {
        let mut input = line;
        parse_tokens.parse_next(&mut input).unwrap_or(Tokens {
            verb: "",
            param1: "",
            param2: "",
        })
    }
}

impl Command {
    /// Parse one line.
    ///
    /// # Errors
    ///
    /// - [`CommandError::UnknownCommand`] for an empty line or unknown verb
    /// - [`CommandError::InvalidAxis`] if the selector is not `A` or `B`
    /// - [`CommandError::InvalidArgument`] if the numeric argument is missing
    ///   or not an integer
    pub fn parse(line: &str) -> core::result::Result<Command, CommandError> {
        let tokens = Tokens::split(line);
        let verb = tokens.verb;

        if verb.eq_ignore_ascii_case("HOME") {
            Ok(Command::Home)
        } else if verb.eq_ignore_ascii_case("HOME_LOOP") {
            Ok(Command::HomeLoop)
        } else if verb.eq_ignore_ascii_case("GETPOS") {
            Ok(Command::GetPosition)
        } else if verb.eq_ignore_ascii_case("MOVE_REL") {
            let (axis, steps) = axis_and_value(&tokens)?;
            Ok(Command::MoveRelative { axis, steps })
        } else if verb.eq_ignore_ascii_case("MOVE_ABS") {
            let (axis, position) = axis_and_value(&tokens)?;
            Ok(Command::MoveAbsolute { axis, position })
        } else {
            Err(CommandError::UnknownCommand)
        }
    }
}

fn axis_and_value(tokens: &Tokens<'_>) -> core::result::Result<(AxisSelector, i64), CommandError> {
    let axis = AxisSelector::from_token(tokens.param1).ok_or(CommandError::InvalidAxis)?;
    let mut input = tokens.param2;
    let value = parse_integer
        .parse_next(&mut input)
        .map_err(|_| CommandError::InvalidArgument)?;
    Ok((axis, value))
}

fn parse_token<'s>(input: &mut &'s str) -> Result<&'s str> {
    preceded(multispace0, take_till(0.., |c: char| c.is_whitespace())).parse_next(input)
}

fn parse_tokens<'s>(input: &mut &'s str) -> Result<Tokens<'s>> {
    (parse_token, parse_token, preceded(multispace0, rest))
        .map(|(verb, param1, param2): (&'s str, &'s str, &'s str)| Tokens {
            verb,
            param1,
            param2: param2.trim_end(),
        })
        .parse_next(input)
}

/// Signed decimal integer spanning the whole input.
fn parse_integer(input: &mut &str) -> Result<i64> {
    terminated(dec_int, eof).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tokens() {
        let tokens = Tokens::split("  MOVE_REL   a  12 34  ");
        assert_eq!(tokens.verb, "MOVE_REL");
        assert_eq!(tokens.param1, "a");
        assert_eq!(tokens.param2, "12 34");
    }

    #[test]
    fn test_split_verb_only() {
        let tokens = Tokens::split("GETPOS\r");
        assert_eq!(tokens.verb, "GETPOS");
        assert_eq!(tokens.param1, "");
        assert_eq!(tokens.param2, "");
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            Command::parse("move_rel b -250"),
            Ok(Command::MoveRelative {
                axis: AxisSelector::B,
                steps: -250
            })
        );
        assert_eq!(
            Command::parse("MOVE_ABS A +2000"),
            Ok(Command::MoveAbsolute {
                axis: AxisSelector::A,
                position: 2000
            })
        );
    }

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!(Command::parse("home"), Ok(Command::Home));
        assert_eq!(Command::parse("Home_Loop"), Ok(Command::HomeLoop));
        assert_eq!(Command::parse(" GETPOS extra "), Ok(Command::GetPosition));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse(""), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse("JOG A 5"), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse("MOVE_REL C 5"), Err(CommandError::InvalidAxis));
        assert_eq!(Command::parse("MOVE_REL"), Err(CommandError::InvalidAxis));
        assert_eq!(Command::parse("MOVE_REL A"), Err(CommandError::InvalidArgument));
        assert_eq!(Command::parse("MOVE_ABS B 1.5"), Err(CommandError::InvalidArgument));
        assert_eq!(Command::parse("MOVE_ABS B 10 20"), Err(CommandError::InvalidArgument));
    }

    #[test]
    fn test_selector_checked_before_argument() {
        assert_eq!(Command::parse("MOVE_ABS X abc"), Err(CommandError::InvalidAxis));
    }
}
