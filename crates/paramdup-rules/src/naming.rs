//! Name suggestion for duplicated parameters
//!
//! Names are handled without the `$` sigil.
//!
//! ```text
//! x2    -> x3
//! a10   -> a11
//! a     -> b
//! value -> value1
//! z     -> z1
//! ```

/// Suggest a name for the duplicate of a parameter called `old_name`
pub fn suggest_name(old_name: &str) -> String {
    let prefix = old_name.trim_end_matches(|c: char| c.is_ascii_digit());
    if prefix.len() < old_name.len() {
        let digits = &old_name[prefix.len()..];
        return format!("{}{}", prefix, increment_decimal(digits));
    }

    let mut chars = old_name.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() && !letter.eq_ignore_ascii_case(&'z') {
            return char::from(letter as u8 + 1).to_string();
        }
    }

    format!("{}1", old_name)
}

/// Add one to a run of ASCII digits, treating it as an unbounded integer
fn increment_decimal(digits: &str) -> String {
    let significant = digits.trim_start_matches('0');
    let mut out: Vec<u8> = significant.bytes().collect();

    let mut carry = true;
    for digit in out.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        out.insert(0, b'1');
    }

    // Only ASCII digits were pushed
    String::from_utf8(out).unwrap_or_default()
}
