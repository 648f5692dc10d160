//! Output file naming.
//!
//! Expands the user's `--format` template against the current local time:
//!
//! | Directive | Expansion                    |
//! |-----------|------------------------------|
//! | `%Y`      | year, 4 digits               |
//! | `%y`      | year since 2000, 2 digits    |
//! | `%M`      | month, 2 digits              |
//! | `%d`      | day of month, 2 digits       |
//! | `%h`      | hour (24h), 2 digits         |
//! | `%H`      | hour (12h), 2 digits         |
//! | `%p`      | `AM` or `PM`                 |
//! | `%m`      | minute, 2 digits             |
//! | `%s`      | second, 2 digits             |
//! | `%%`      | literal `%`                  |

use chrono::{Datelike, Timelike};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest output path we are willing to build.
pub const MAX_PATH_LEN: usize = 4096;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("invalid format: %{0} (see `gripper --help` for the available directives)")]
    UnknownDirective(char),

    #[error("format ends with a lone '%'")]
    DanglingPercent,

    #[error("using %y but the current year ({0}) is smaller than 2000")]
    YearBefore2000(i32),

    #[error("resulting output filename is too large (limit is {0} bytes)")]
    TooLong(usize),
}

/// String builder that refuses to grow past a fixed limit.
#[derive(Debug)]
pub struct BoundedString {
    buf: String,
    limit: usize,
    reserved: usize,
}

impl BoundedString {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: String::new(),
            limit,
            reserved: 0,
        }
    }

    /// Builder for the tail of a value whose first `reserved` bytes live elsewhere.
    pub fn with_reserved(limit: usize, reserved: usize) -> Result<Self, NameError> {
        if reserved > limit {
            return Err(NameError::TooLong(limit));
        }
        let mut out = Self::new(limit);
        out.reserved = reserved;
        Ok(out)
    }

    pub fn push_str(&mut self, s: &str) -> Result<(), NameError> {
        if self.reserved + self.buf.len() + s.len() > self.limit {
            return Err(NameError::TooLong(self.limit));
        }
        self.buf.push_str(s);
        Ok(())
    }

    pub fn push(&mut self, c: char) -> Result<(), NameError> {
        let mut tmp = [0u8; 4];
        self.push_str(c.encode_utf8(&mut tmp))
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Expand `template` into `out` using `now`.
fn expand_into<T>(out: &mut BoundedString, template: &str, now: &T) -> Result<(), NameError>
where
    T: Datelike + Timelike,
{
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c)?;
            continue;
        }

        let directive = chars.next().ok_or(NameError::DanglingPercent)?;
        match directive {
            'Y' => out.push_str(&format!("{:04}", now.year()))?,
            'y' => {
                let year = now.year();
                if year < 2000 {
                    return Err(NameError::YearBefore2000(year));
                }
                out.push_str(&format!("{:02}", year - 2000))?;
            }
            'M' => out.push_str(&format!("{:02}", now.month()))?,
            'd' => out.push_str(&format!("{:02}", now.day()))?,
            'h' => out.push_str(&format!("{:02}", now.hour()))?,
            'H' => out.push_str(&format!("{:02}", now.hour() % 12))?,
            'p' => out.push_str(if now.hour() < 12 { "AM" } else { "PM" })?,
            'm' => out.push_str(&format!("{:02}", now.minute()))?,
            's' => out.push_str(&format!("{:02}", now.second()))?,
            '%' => out.push('%')?,
            other => return Err(NameError::UnknownDirective(other)),
        }
    }
    Ok(())
}

/// Build `<dir>/<expanded template>.<extension>`.
///
/// Deterministic in its inputs: the caller supplies the time. The directory
/// is joined as-is and counts against [`MAX_PATH_LEN`].
pub fn output_path<T>(
    dir: &Path,
    template: &str,
    now: &T,
    extension: &str,
) -> Result<PathBuf, NameError>
where
    T: Datelike + Timelike,
{
    let mut name = BoundedString::with_reserved(MAX_PATH_LEN, dir.as_os_str().len() + 1)?;
    expand_into(&mut name, template, now)?;
    name.push('.')?;
    name.push_str(extension)?;
    Ok(dir.join(name.into_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn expand_template(template: &str, now: &NaiveDateTime) -> Result<String, NameError> {
        let mut out = BoundedString::new(MAX_PATH_LEN);
        expand_into(&mut out, template, now)?;
        Ok(out.into_string())
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn expands_date_directives() {
        let now = at(2024, 3, 5, 0, 0, 0);
        let path = output_path(Path::new("/shots"), "Shot_%Y%M%d", &now, "png").unwrap();
        assert_eq!(path, PathBuf::from("/shots/Shot_20240305.png"));
    }

    #[test]
    fn expands_default_template() {
        let now = at(2025, 1, 13, 14, 54, 46);
        let name = expand_template("Screenshot_%Y%M%d_%h%m%s", &now).unwrap();
        assert_eq!(name, "Screenshot_20250113_145446");
    }

    #[test]
    fn expands_short_year_and_twelve_hour_clock() {
        let now = at(2025, 1, 13, 14, 5, 9);
        assert_eq!(
            expand_template("%y-%M-%d %H:%m:%s %p", &now).unwrap(),
            "25-01-13 02:05:09 PM"
        );
        let morning = at(2025, 1, 13, 9, 0, 0);
        assert_eq!(expand_template("%H%p", &morning).unwrap(), "09AM");
    }

    #[test]
    fn literal_percent() {
        let now = at(2024, 1, 1, 0, 0, 0);
        assert_eq!(expand_template("100%%", &now).unwrap(), "100%");
    }

    #[test]
    fn unknown_directive_names_character() {
        let now = at(2024, 1, 1, 0, 0, 0);
        let err = expand_template("shot_%q", &now).unwrap_err();
        assert_eq!(err, NameError::UnknownDirective('q'));
        assert!(err.to_string().contains("%q"));
    }

    #[test]
    fn trailing_percent_is_rejected() {
        let now = at(2024, 1, 1, 0, 0, 0);
        assert_eq!(
            expand_template("shot_%", &now),
            Err(NameError::DanglingPercent)
        );
    }

    #[test]
    fn short_year_before_2000_fails() {
        let now = at(1999, 12, 31, 23, 59, 59);
        assert_eq!(
            expand_template("%y", &now),
            Err(NameError::YearBefore2000(1999))
        );
        assert_eq!(expand_template("%Y", &now).unwrap(), "1999");
    }

    #[test]
    fn same_inputs_same_path() {
        let now = at(2024, 7, 1, 12, 30, 0);
        let a = output_path(Path::new("/d"), "x_%h%m", &now, "jpeg").unwrap();
        let b = output_path(Path::new("/d"), "x_%h%m", &now, "jpeg").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, PathBuf::from("/d/x_1230.jpeg"));
    }

    #[test]
    fn trailing_slash_in_dir_is_not_doubled() {
        let now = at(2024, 7, 1, 12, 30, 0);
        let path = output_path(Path::new("/d/"), "x", &now, "ppm").unwrap();
        assert_eq!(path, PathBuf::from("/d/x.ppm"));
    }

    #[test]
    fn pathological_template_is_rejected() {
        let now = at(2024, 7, 1, 12, 30, 0);
        let template = "%Y".repeat(MAX_PATH_LEN);
        assert_eq!(
            output_path(Path::new("/d"), &template, &now, "png"),
            Err(NameError::TooLong(MAX_PATH_LEN))
        );
    }

    #[test]
    fn long_directory_leaves_no_room_for_the_name() {
        let now = at(2024, 7, 1, 12, 30, 0);
        let dir = PathBuf::from(format!("/{}", "d".repeat(MAX_PATH_LEN - 8)));
        assert_eq!(
            output_path(&dir, "shot", &now, "png"),
            Err(NameError::TooLong(MAX_PATH_LEN))
        );
        assert!(output_path(&dir, "s", &now, "png").is_ok());
    }

    #[test]
    fn non_utf8_directory_is_kept_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let now = at(2024, 7, 1, 12, 30, 0);
        let dir = Path::new(OsStr::from_bytes(b"/shots\xff"));
        let path = output_path(dir, "x", &now, "png").unwrap();
        assert_eq!(path.parent(), Some(dir));
    }

    #[test]
    fn bounded_string_never_exceeds_limit() {
        let mut s = BoundedString::new(4);
        s.push_str("abc").unwrap();
        assert!(s.push_str("de").is_err());
        s.push('d').unwrap();
        assert!(s.push('e').is_err());
        assert_eq!(s.into_string(), "abcd");

        assert!(BoundedString::with_reserved(4, 5).is_err());
        let mut tail = BoundedString::with_reserved(4, 3).unwrap();
        tail.push('a').unwrap();
        assert!(tail.push('b').is_err());
    }
}
