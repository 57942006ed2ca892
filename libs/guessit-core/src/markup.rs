//! Close-miss markup between a student answer and the expected answer.
//!
//! The markup is a prefix diff: one code per matching position, then a
//! single hint at the first divergence.
//!
//! | code | meaning |
//! |------|---------|
//! | `=`  | same character |
//! | `>`  | the expected character sorts after the typed one |
//! | `<`  | the expected character sorts before the typed one |
//! | other | the expected character, revealed |

/// Expected characters that are revealed instead of hinted.
const REVEALED: &[char] = &['\'', ';', ':', ',', '.', '-', '?', '¿', '!', '¡', 'ß', 'œ'];

pub const SAME: char = '=';
pub const AFTER: char = '>';
pub const BEFORE: char = '<';

/// Build the markup string for `given` against `expected`.
///
/// Positions are compared by Unicode scalar value, up to the shorter
/// string. Stops after the first differing position. A character that
/// differs only by case or accent is revealed.
pub fn diff(given: &str, expected: &str) -> String {
    let mut markup = String::new();

    for (g, e) in given.chars().zip(expected.chars()) {
        if g == e {
            markup.push(SAME);
            continue;
        }

        let g_loose = crate::normalize::loose_char(g);
        let e_loose = crate::normalize::loose_char(e);

        if g_loose == e_loose || REVEALED.contains(&e) {
            markup.push(e);
        } else if g_loose < e_loose {
            markup.push(AFTER);
        } else {
            markup.push(BEFORE);
        }
        break;
    }

    markup
}
