//! Interactive stdin prompts for the terminal front-end.
//!
//! The terminal variant takes no value flags: work minutes, break minutes
//! and cycle count are read from standard input. Invalid input is
//! recoverable; the user is re-prompted until a valid value arrives or
//! input is closed.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::types::{CyclePlan, MAX_CYCLES, MAX_MINUTES};

/// Parses one user-supplied count.
///
/// Returns a user-facing error message for non-numeric input.
pub fn parse_count(input: &str) -> Result<u32, String> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| "Please enter valid numeric values.".to_string())
}

/// Reads a full cycle plan, prompting on `output` and reading `input`.
///
/// Generic over the streams so tests can drive it with in-memory buffers.
///
/// # Errors
///
/// Returns an error only if input is closed (EOF) or a stream fails;
/// invalid values are re-prompted, not returned as errors.
pub fn read_plan<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<CyclePlan> {
    let work = read_value(
        &mut input,
        &mut output,
        "Enter work session duration (minutes): ",
        1,
        MAX_MINUTES,
    )?;
    let brk = read_value(
        &mut input,
        &mut output,
        "Enter break duration (minutes): ",
        0,
        MAX_MINUTES,
    )?;
    let cycles = read_value(&mut input, &mut output, "Enter number of cycles: ", 1, MAX_CYCLES)?;

    // Field ranges above already enforce plan validity
    CyclePlan::new(work, brk, cycles).map_err(anyhow::Error::msg)
}

/// Prompts until a number within `min..=max` is entered.
fn read_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    min: u32,
    max: u32,
) -> Result<u32> {
    let mut line = String::new();

    loop {
        write!(output, "{}", label)?;
        output.flush()?;

        line.clear();
        let bytes = input
            .read_line(&mut line)
            .context("Failed to read from standard input")?;
        if bytes == 0 {
            anyhow::bail!("Input closed before a value was entered");
        }

        match parse_count(&line) {
            Ok(value) if value < min => {
                writeln!(output, "Please enter a number of at least {}.", min)?;
            }
            Ok(value) if value > max => {
                writeln!(output, "Please enter a number of at most {}.", max)?;
            }
            Ok(value) => return Ok(value),
            Err(message) => {
                writeln!(output, "{}", message)?;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // ------------------------------------------------------------------------
    // parse_count Tests
    // ------------------------------------------------------------------------

    mod parse_count_tests {
        use super::*;

        #[test]
        fn test_valid_number() {
            assert_eq!(parse_count("25"), Ok(25));
        }

        #[test]
        fn test_trims_whitespace() {
            assert_eq!(parse_count("  5\n"), Ok(5));
        }

        #[test]
        fn test_zero() {
            assert_eq!(parse_count("0"), Ok(0));
        }

        #[test]
        fn test_non_numeric() {
            let err = parse_count("abc").unwrap_err();
            assert_eq!(err, "Please enter valid numeric values.");
        }

        #[test]
        fn test_negative() {
            assert!(parse_count("-5").is_err());
        }

        #[test]
        fn test_float() {
            assert!(parse_count("2.5").is_err());
        }

        #[test]
        fn test_empty() {
            assert!(parse_count("").is_err());
        }
    }

    // ------------------------------------------------------------------------
    // read_plan Tests
    // ------------------------------------------------------------------------

    mod read_plan_tests {
        use super::*;

        #[test]
        fn test_reads_three_values() {
            let input = Cursor::new("25\n5\n4\n");
            let mut output = Vec::new();

            let plan = read_plan(input, &mut output).unwrap();

            assert_eq!(plan.work_minutes, 25);
            assert_eq!(plan.break_minutes, 5);
            assert_eq!(plan.cycle_count, 4);
        }

        #[test]
        fn test_prompts_in_order() {
            let input = Cursor::new("1\n1\n2\n");
            let mut output = Vec::new();

            read_plan(input, &mut output).unwrap();

            let text = String::from_utf8(output).unwrap();
            let work_pos = text.find("work session duration").unwrap();
            let break_pos = text.find("break duration").unwrap();
            let cycles_pos = text.find("number of cycles").unwrap();
            assert!(work_pos < break_pos);
            assert!(break_pos < cycles_pos);
        }

        #[test]
        fn test_invalid_input_reprompts() {
            let input = Cursor::new("abc\n25\n5\n4\n");
            let mut output = Vec::new();

            let plan = read_plan(input, &mut output).unwrap();

            assert_eq!(plan.work_minutes, 25);
            let text = String::from_utf8(output).unwrap();
            assert!(text.contains("Please enter valid numeric values."));
        }

        #[test]
        fn test_zero_work_reprompts() {
            let input = Cursor::new("0\n25\n5\n4\n");
            let mut output = Vec::new();

            let plan = read_plan(input, &mut output).unwrap();

            assert_eq!(plan.work_minutes, 25);
            let text = String::from_utf8(output).unwrap();
            assert!(text.contains("at least 1"));
        }

        #[test]
        fn test_oversized_work_reprompts() {
            // 100 million minutes must re-prompt, not overflow downstream
            let input = Cursor::new("100000000\n25\n5\n4\n");
            let mut output = Vec::new();

            let plan = read_plan(input, &mut output).unwrap();

            assert_eq!(plan.work_minutes, 25);
            let text = String::from_utf8(output).unwrap();
            assert!(text.contains("at most 999"));
        }

        #[test]
        fn test_zero_break_accepted() {
            let input = Cursor::new("25\n0\n4\n");
            let mut output = Vec::new();

            let plan = read_plan(input, &mut output).unwrap();
            assert_eq!(plan.break_minutes, 0);
        }

        #[test]
        fn test_eof_is_an_error() {
            let input = Cursor::new("");
            let mut output = Vec::new();

            let result = read_plan(input, &mut output);
            assert!(result.is_err());
        }

        #[test]
        fn test_eof_mid_sequence_is_an_error() {
            let input = Cursor::new("25\n5\n");
            let mut output = Vec::new();

            let result = read_plan(input, &mut output);
            assert!(result.is_err());
        }
    }
}
