//! Date detection for number formats

/// Whether a built-in number format id is a date or time format
///
/// Covers the locale-independent ids 14-22 and 45-47 plus the CJK
/// locale date ids 27-36 and 50-58.
pub fn is_builtin_date_format(id: u32) -> bool {
    matches!(id, 14..=22 | 27..=36 | 45..=47 | 50..=58)
}

/// Whether a custom format code displays a date or time
///
/// Only the first section (up to `;`) is examined. Quoted literals,
/// backslash/underscore escapes and bracketed sections such as colours or
/// conditions are skipped. Elapsed-time codes (`[h]`, `[mm]`, `[ss]`) are
/// durations, not dates.
pub fn is_date_format_code(code: &str) -> bool {
    let mut escaped = false;
    let mut in_quote = false;
    let mut bracket_depth = 0u8;
    let mut bracket_start = false;
    let mut elapsed = false;
    let mut after_a = false;

    for c in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if in_quote {
            in_quote = c != '"';
            continue;
        }

        match c {
            '\\' | '_' => escaped = true,
            '"' => in_quote = true,
            ';' => return false,
            '[' => {
                bracket_depth = bracket_depth.saturating_add(1);
                bracket_start = true;
                elapsed = false;
                continue;
            }
            ']' => {
                if bracket_depth == 1 && elapsed {
                    return false;
                }
                bracket_depth = bracket_depth.saturating_sub(1);
            }
            _ if bracket_depth > 0 => {
                let unit = matches!(c.to_ascii_lowercase(), 'h' | 'm' | 's');
                elapsed = unit && (bracket_start || elapsed);
            }
            // AM/PM and A/P markers
            'a' | 'A' => after_a = true,
            'p' | 'P' | 'm' | 'M' | '/' if after_a => return true,
            'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' => return true,
            _ => {}
        }
        bracket_start = false;
    }

    false
}
