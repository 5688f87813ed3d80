//! Bulk course edits driven by pasted text, one line per course in list order.

use thiserror::Error;

use crate::document::{Course, PromoCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkEditError {
    /// 1-based line numbers of URLs without an `http://` or `https://` scheme.
    #[error("invalid URLs on lines {0:?}: links must start with http:// or https://")]
    InvalidUrls(Vec<usize>),
}

fn non_blank_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

pub fn is_valid_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Assign one URL per course. Courses past the end of the list keep their
/// URL. Returns the number of courses updated.
pub fn apply_bulk_urls(courses: &mut [Course], text: &str) -> Result<usize, BulkEditError> {
    let urls = non_blank_lines(text);

    let invalid: Vec<usize> = urls
        .iter()
        .enumerate()
        .filter(|(_, url)| !is_valid_url(url))
        .map(|(i, _)| i + 1)
        .collect();
    if !invalid.is_empty() {
        return Err(BulkEditError::InvalidUrls(invalid));
    }

    for (course, url) in courses.iter_mut().zip(&urls) {
        course.url = (*url).to_string();
    }
    Ok(urls.len().min(courses.len()))
}

/// Parse `CODE`, `CODE|Text` or `CODE|Text|Percent`. Empty text and an
/// unparseable percent fall back to the defaults.
pub fn parse_promo_line(line: &str, default_text: &str, default_percent: u32) -> PromoCode {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();

    let discount_text = match parts.get(1) {
        Some(text) if !text.is_empty() => (*text).to_string(),
        _ => default_text.to_string(),
    };
    let discount_percent = parts
        .get(2)
        .and_then(|p| leading_integer(p))
        .filter(|p| *p != 0)
        .unwrap_or(default_percent);

    PromoCode {
        code: parts.first().copied().unwrap_or_default().to_string(),
        discount_text,
        discount_percent,
    }
}

/// Integer prefix of `s` (`"15%"` → 15).
fn leading_integer(s: &str) -> Option<u32> {
    let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Assign one promo code per course. Returns the number of courses updated.
pub fn apply_bulk_promos(
    courses: &mut [Course],
    text: &str,
    default_text: &str,
    default_percent: u32,
) -> usize {
    let lines = non_blank_lines(text);

    for (course, line) in courses.iter_mut().zip(&lines) {
        course.promo_code = Some(parse_promo_line(line, default_text, default_percent));
    }
    lines.len().min(courses.len())
}

/// Move the course with id `from_id` to the position currently held by
/// `to_id`. Returns `false` when either id is missing or they are equal.
pub fn move_course(courses: &mut Vec<Course>, from_id: i64, to_id: i64) -> bool {
    if from_id == to_id {
        return false;
    }
    let (Some(from), Some(to)) = (
        courses.iter().position(|c| c.id == from_id),
        courses.iter().position(|c| c.id == to_id),
    ) else {
        return false;
    };

    let course = courses.remove(from);
    courses.insert(to, course);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses(n: i64) -> Vec<Course> {
        (1..=n)
            .map(|id| Course {
                id,
                url: format!("https://old/{id}"),
                ..Course::default()
            })
            .collect()
    }

    fn ids(courses: &[Course]) -> Vec<i64> {
        courses.iter().map(|c| c.id).collect()
    }

    #[test]
    fn bulk_urls_update_in_order() {
        let mut list = courses(3);
        let updated = apply_bulk_urls(&mut list, "https://a\n\n  http://b  \n").unwrap();

        assert_eq!(updated, 2);
        assert_eq!(list[0].url, "https://a");
        assert_eq!(list[1].url, "http://b");
        assert_eq!(list[2].url, "https://old/3");
    }

    #[test]
    fn bulk_urls_reject_whole_batch_on_bad_line() {
        let mut list = courses(3);
        let err = apply_bulk_urls(&mut list, "https://a\nftp://b\nwww.c").unwrap_err();

        assert_eq!(err, BulkEditError::InvalidUrls(vec![2, 3]));
        assert_eq!(list[0].url, "https://old/1");
    }

    #[test]
    fn promo_line_forms() {
        assert_eq!(
            parse_promo_line("SALE", "Discount", 10),
            PromoCode {
                code: "SALE".into(),
                discount_text: "Discount".into(),
                discount_percent: 10
            }
        );
        let two = parse_promo_line("SALE | Spring offer", "Discount", 10);
        assert_eq!(two.discount_text, "Spring offer");
        assert_eq!(two.discount_percent, 10);

        let three = parse_promo_line("SALE|Spring offer|25%", "Discount", 10);
        assert_eq!(three.discount_percent, 25);

        let bad = parse_promo_line("SALE||lots", "Discount", 10);
        assert_eq!(bad.discount_text, "Discount");
        assert_eq!(bad.discount_percent, 10);
    }

    #[test]
    fn bulk_promos_leave_remaining_courses() {
        let mut list = courses(3);
        let updated = apply_bulk_promos(&mut list, "A\nB|Text|5", "Discount", 10);

        assert_eq!(updated, 2);
        assert_eq!(list[1].promo_code.as_ref().unwrap().discount_percent, 5);
        assert!(list[2].promo_code.is_none());
    }

    #[test]
    fn move_by_id() {
        let mut list = courses(4);
        assert!(move_course(&mut list, 1, 3));
        assert_eq!(ids(&list), vec![2, 3, 1, 4]);

        assert!(move_course(&mut list, 4, 2));
        assert_eq!(ids(&list), vec![4, 2, 3, 1]);

        assert!(!move_course(&mut list, 4, 99));
        assert!(!move_course(&mut list, 2, 2));
    }
}
