/// File extensions treated as images during listing.
pub const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Case-insensitive substring query supplied by one chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    needle: String,
    raw: String,
}

impl Query {
    /// Creates a query from the raw message text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();

        Self { needle, raw }
    }

    /// Returns the text as the user typed it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns whether the query holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Returns whether `text` contains the query, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    /// Returns whether `name` is an image file whose name contains the query.
    pub fn matches_image_name(&self, name: &str) -> bool {
        is_image_name(name) && self.matches(name)
    }
}

/// Returns whether `name` ends with one of [`IMAGE_EXTENSIONS`], ignoring
/// case.
pub fn is_image_name(name: &str) -> bool {
    let name = name.to_lowercase();

    IMAGE_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ignores_case_on_both_sides() {
        // Arrange
        let query = Query::new("Cat");

        // Act
        let is_match = query.matches("my CAT_photo");

        // Assert
        assert!(is_match);
    }

    #[test]
    fn test_matches_image_name_accepts_uppercase_extension() {
        // Arrange
        let query = Query::new("cat");

        // Act
        let is_match = query.matches_image_name("CAT_photo.PNG");

        // Assert
        assert!(is_match);
    }

    #[test]
    fn test_matches_image_name_rejects_non_image_file() {
        // Arrange
        let query = Query::new("cat");

        // Act
        let is_match = query.matches_image_name("cat_notes.txt");

        // Assert
        assert!(!is_match);
    }

    #[test]
    fn test_is_image_name_accepts_every_supported_extension() {
        // Arrange
        let names = ["a.png", "b.jpg", "c.JPEG"];

        // Act
        let all_images = names.iter().all(|name| is_image_name(name));

        // Assert
        assert!(all_images);
    }

    #[test]
    fn test_is_image_name_requires_extension_suffix() {
        // Arrange
        let name = "png_backup.gif";

        // Act
        let is_image = is_image_name(name);

        // Assert
        assert!(!is_image);
    }

    #[test]
    fn test_is_blank_detects_whitespace_only_text() {
        // Arrange
        let query = Query::new("  \n");

        // Act
        let is_blank = query.is_blank();

        // Assert
        assert!(is_blank);
    }
}
