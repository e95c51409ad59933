//! Escape sequence decoding for replacement values
//!
//!     Only the replacement half of a `Replace*` line is decoded; needles and keys are
//!     taken literally. Supported escapes:
//!
//!         \\  \n  \r  \t  \b      the usual characters
//!         \0NNN                   up to three octal digits after the zero
//!         \uXXXX                  up to four hex digits
//!
//!     A digit escape ends after its maximum digit count or at the first character that is
//!     not a digit, and that character is then read normally. Short escapes are decoded
//!     from whatever digits were collected, also at end of input. Escapes whose digits do
//!     not form a valid character are dropped silently; unknown escape letters are
//!     reported and dropped.

use crate::usfm::diagnostics::ConfigWarning;

const MAX_OCTAL_DIGITS: usize = 3;
const MAX_HEX_DIGITS: usize = 4;

enum Mode {
    Plain,
    AfterBackslash,
    Octal(String),
    Hex(String),
}

/// Decode `raw`, logging any problems.
pub fn decode(raw: &str) -> String {
    decode_reporting(raw, &mut Vec::new())
}

/// Decode `raw`, appending problems to `warnings` as well as logging them.
pub fn decode_reporting(raw: &str, warnings: &mut Vec<ConfigWarning>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut mode = Mode::Plain;

    for c in raw.chars() {
        mode = match mode {
            Mode::Plain => plain(c, &mut out),
            Mode::AfterBackslash => match c {
                '\\' => push(&mut out, '\\'),
                'r' => push(&mut out, '\r'),
                'n' => push(&mut out, '\n'),
                'b' => push(&mut out, '\u{8}'),
                't' => push(&mut out, '\t'),
                '0' => Mode::Octal(String::new()),
                'u' => Mode::Hex(String::new()),
                other => {
                    report(warnings, ConfigWarning::UnknownEscape { character: other });
                    Mode::Plain
                }
            },
            Mode::Octal(mut digits) => {
                if c.is_ascii_digit() {
                    digits.push(c);
                    if digits.len() == MAX_OCTAL_DIGITS {
                        flush(&digits, 8, &mut out);
                        Mode::Plain
                    } else {
                        Mode::Octal(digits)
                    }
                } else {
                    flush(&digits, 8, &mut out);
                    plain(c, &mut out)
                }
            }
            Mode::Hex(mut digits) => {
                if c.is_ascii_hexdigit() {
                    digits.push(c);
                    if digits.len() == MAX_HEX_DIGITS {
                        flush(&digits, 16, &mut out);
                        Mode::Plain
                    } else {
                        Mode::Hex(digits)
                    }
                } else {
                    flush(&digits, 16, &mut out);
                    plain(c, &mut out)
                }
            }
        };
    }

    match mode {
        Mode::Plain => {}
        Mode::AfterBackslash => report(warnings, ConfigWarning::DanglingEscape),
        Mode::Octal(digits) => flush(&digits, 8, &mut out),
        Mode::Hex(digits) => flush(&digits, 16, &mut out),
    }

    out
}

fn plain(c: char, out: &mut String) -> Mode {
    if c == '\\' {
        Mode::AfterBackslash
    } else {
        push(out, c)
    }
}

fn push(out: &mut String, c: char) -> Mode {
    out.push(c);
    Mode::Plain
}

fn flush(digits: &str, radix: u32, out: &mut String) {
    if let Some(c) = u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
    {
        out.push(c);
    }
}

fn report(warnings: &mut Vec<ConfigWarning>, warning: ConfigWarning) {
    tracing::warn!("{}", warning);
    warnings.push(warning);
}
