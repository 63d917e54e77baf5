/// Document-wide construction options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentConfig {
    /// ASCII-lowercase element names on creation, as HTML documents do.
    pub lowercase_tag_names: bool,
    /// Reject element names outside the HTML element table.
    /// Custom elements (names containing `-`) are still accepted.
    pub known_tags_only: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            lowercase_tag_names: true,
            known_tags_only: false,
        }
    }
}
