//! Static-analysis results rendered into review comment text.

use std::fmt;
use std::str::FromStr;

/// Ordered mapping from check title to a count or description.
///
/// Entries keep insertion order so the rendered comment is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationSummary(Vec<(String, String)>);

impl ViolationSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, replacing the value of an existing title in place.
    pub fn insert(&mut self, title: impl Into<String>, value: impl fmt::Display) {
        let title = title.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(t, _)| *t == title) {
            Some(entry) => entry.1 = value,
            None => self.0.push((title, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// Render the comment body posted against the checked file.
    ///
    /// # Examples
    ///
    /// ```
    /// use jecket::ViolationSummary;
    ///
    /// let mut summary = ViolationSummary::new();
    /// summary.insert("PMD errors:", 3);
    /// assert_eq!(
    ///     summary.comment_text("http://ci/1"),
    ///     "PMD errors: 3  You can find details via link http://ci/1"
    /// );
    /// ```
    #[must_use]
    pub fn comment_text(&self, build_link: &str) -> String {
        let mut text: String = self
            .iter()
            .map(|(title, value)| format!("{title} {value} "))
            .collect();
        text.push_str(" You can find details via link ");
        text.push_str(build_link);
        text
    }
}

impl<T: Into<String>, V: fmt::Display> FromIterator<(T, V)> for ViolationSummary {
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iter: I) -> Self {
        let mut summary = Self::new();
        for (title, value) in iter {
            summary.insert(title, value);
        }
        summary
    }
}

/// A single `TITLE=VALUE` pair given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationArg {
    pub title: String,
    pub value: String,
}

impl FromStr for ViolationArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (title, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected TITLE=VALUE, got '{s}'"))?;
        if title.trim().is_empty() {
            return Err(format!("empty violation title in '{s}'"));
        }
        Ok(Self {
            title: title.to_owned(),
            value: value.to_owned(),
        })
    }
}
