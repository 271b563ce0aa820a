//! Amount in words using the Indian numbering system (thousand, lakh, crore).

use crate::tax::round_rupees;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Spell out `amount` in English words, e.g. `1_234_567` →
/// `"Twelve Lakh Thirty Four Thousand Five Hundred and Sixty Seven"`.
///
/// No currency words are added. A crore count of a thousand or more is itself
/// spelled with Indian grouping (`"One Thousand Crore"`).
pub fn to_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let mut out = String::new();
    push_grouped(&mut out, amount);
    out.trim().to_string()
}

/// `"<words> Rupees Only"` for a positive total, rounded to the nearest rupee.
///
/// Returns `None` when there is nothing to spell out (zero or invalid total).
pub fn rupees_in_words(total: f64) -> Option<String> {
    if !(total > 0.0) {
        return None;
    }
    Some(format!("{} Rupees Only", to_words(round_rupees(total))))
}

fn push_grouped(out: &mut String, amount: u64) {
    let crore = amount / CRORE;
    let lakh = (amount % CRORE) / LAKH;
    let thousand = (amount % LAKH) / THOUSAND;
    let remainder = amount % THOUSAND;

    if crore > 0 {
        if crore < THOUSAND {
            push_word(out, &below_thousand(crore));
        } else {
            push_grouped(out, crore);
        }
        push_word(out, "Crore");
    }
    for (group, unit) in [(lakh, "Lakh"), (thousand, "Thousand")] {
        if group > 0 {
            push_word(out, &below_thousand(group));
            push_word(out, unit);
        }
    }
    if remainder > 0 {
        push_word(out, &below_thousand(remainder));
    }
}

fn push_word(out: &mut String, word: &str) {
    if word.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(word);
}

/// Words for `0..=999`; empty for 0.
fn below_thousand(n: u64) -> String {
    debug_assert!(n < THOUSAND);
    let n = n as usize;
    match n {
        0 => String::new(),
        1..=9 => ONES[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        20..=99 => {
            let tens = TENS[n / 10];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{tens} {}", ONES[ones]),
            }
        }
        _ => {
            let hundreds = format!("{} Hundred", ONES[n / 100]);
            match n % 100 {
                0 => hundreds,
                rest => format!("{hundreds} and {}", below_thousand(rest as u64)),
            }
        }
    }
}
