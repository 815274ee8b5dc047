use chrono::{DateTime, Utc};

pub const DEFAULT_MAX_LABEL_LEN: usize = 30;

/// Colon-free UTC timestamp used in every file name of one export run:
/// `YYYY-MM-DDTHH-MM-SS`.
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Replace forbidden characters, cut to `max_len` characters, then trim.
///
/// No collision check is made; uniqueness comes from the timestamp suffix
/// alone.
pub fn safe_label(label: &str, max_len: usize) -> String {
    let replaced: String = label
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .take(max_len)
        .collect();
    replaced.trim().to_string()
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|')
}

/// Builds the file names of one export run. The label is truncated before
/// the suffix is added, so the timestamp and extension are never cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNamer {
    timestamp: String,
    max_label_len: usize,
}

impl FileNamer {
    pub fn new(timestamp: impl Into<String>, max_label_len: usize) -> Self {
        Self {
            timestamp: timestamp.into(),
            max_label_len,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `{role}_dialog_{timestamp}.html`
    pub fn role_file(&self, speaker: &str) -> String {
        format!(
            "{}_dialog_{}.html",
            safe_label(speaker, self.max_label_len),
            self.timestamp
        )
    }

    /// `{first}_and_{second}_full_dialog_{timestamp}.html`
    pub fn combined_file(&self, first: &str, second: &str) -> String {
        format!(
            "{}_and_{}_full_dialog_{}.html",
            safe_label(first, self.max_label_len),
            safe_label(second, self.max_label_len),
            self.timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_has_no_colons() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(file_timestamp(at), "2024-03-09T07-05-01");
    }

    #[test]
    fn trim_happens_after_truncation() {
        assert_eq!(safe_label("  Ann  ", 30), "Ann");
        assert_eq!(safe_label("abc   def", 4), "abc");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(safe_label("猫猫猫猫", 2), "猫猫");
    }
}
