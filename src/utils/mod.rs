//! Storefront formatting helpers.
//!
//! Pure functions shared by the page templates: currency display,
//! YouTube URL handling, and contact-field parsing. All of them are
//! testable in isolation.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// Matches the 11-character video id in the common YouTube URL shapes:
/// watch?v=, youtu.be/, embed/, v/, and share links with extra params.
static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("Valid regex pattern")
});

/// Format an amount in Indian-style digit grouping with two decimal
/// places, e.g. `1,00,000.00`. The rupee sign is left to the caller.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (text, "00".to_string()),
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{frac_part}", group_indian(&int_part))
}

/// Indian grouping: the last three digits form one group, every pair
/// before that another, e.g. `12345678` becomes `1,23,45,678`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_bytes = head.as_bytes();
    let mut groups = Vec::new();
    let mut end = head_bytes.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Extract the video id from a YouTube URL, if the URL carries one.
pub fn youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Poster image URL for a YouTube video id.
pub fn youtube_thumbnail(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/hqdefault.jpg")
}

/// Build a wa.me chat link from a free-form phone field. Only the first
/// comma-separated number is used and everything but digits is dropped,
/// so `+91 98765-43210, +91 11 2345 6789` links to the first line.
pub fn whatsapp_link(phone_field: &str) -> Option<String> {
    let first = phone_field.split(',').next()?.trim();
    let digits: String = first.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("https://wa.me/{digits}"))
}

/// Split a comma-separated phone field into display entries.
pub fn split_phones(phone_field: &str) -> Vec<String> {
    phone_field
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_inr_small_amounts() {
        assert_eq!(format_inr(dec!(0)), "0.00");
        assert_eq!(format_inr(dec!(999)), "999.00");
        assert_eq!(format_inr(dec!(1062)), "1,062.00");
        assert_eq!(format_inr(dec!(1062.5)), "1,062.50");
    }

    #[test]
    fn test_format_inr_lakh_and_crore_grouping() {
        assert_eq!(format_inr(dec!(100000)), "1,00,000.00");
        assert_eq!(format_inr(dec!(12345678)), "1,23,45,678.00");
        assert_eq!(format_inr(dec!(12345678.9)), "1,23,45,678.90");
    }

    #[test]
    fn test_format_inr_rounds_to_cents() {
        assert_eq!(format_inr(dec!(1.005)), "1.01");
        assert_eq!(format_inr(dec!(206.489675)), "206.49");
    }

    #[test]
    fn test_youtube_id_url_shapes() {
        let expected = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(youtube_id("https://youtu.be/dQw4w9WgXcQ"), expected);
        assert_eq!(
            youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?feature=shared&v=dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(youtube_id("https://example.com/video"), None);
    }

    #[test]
    fn test_youtube_thumbnail() {
        assert_eq!(
            youtube_thumbnail("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[test]
    fn test_whatsapp_link_uses_first_number_digits_only() {
        assert_eq!(
            whatsapp_link("+91 98765-43210, +91 11 2345 6789"),
            Some("https://wa.me/919876543210".to_string())
        );
        assert_eq!(whatsapp_link(""), None);
        assert_eq!(whatsapp_link("call us"), None);
    }

    #[test]
    fn test_split_phones() {
        assert_eq!(
            split_phones("+91 98765-43210, +91 11 2345 6789"),
            vec!["+91 98765-43210", "+91 11 2345 6789"]
        );
        assert!(split_phones("  ,  ").is_empty());
    }
}
