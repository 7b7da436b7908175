//! Numbered text sections served by the single-page view.
//!
//! The table is built once at startup and handed to request handlers; it is
//! never a process-wide constant.

/// Ordered, 1-based table of plain-text sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTable {
    texts: Vec<String>,
}

impl SectionTable {
    pub fn new(texts: Vec<String>) -> Self {
        Self { texts }
    }

    /// Returns section `num` (1-based), or `None` when out of range.
    pub fn get(&self, num: usize) -> Option<&str> {
        num.checked_sub(1)
            .and_then(|index| self.texts.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl Default for SectionTable {
    fn default() -> Self {
        Self::new(vec![
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Vivamus ac magna eu enim tincidunt varius. Sed euismod libero non purus faucibus, vel hendrerit arcu ullamcorper.".to_string(),
            "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis.".to_string(),
            "At vero eos et accusamus et iusto odio dignissimos ducimus qui blanditiis praesentium voluptatum deleniti atque corrupti quos dolores et quas molestias excepturi.".to_string(),
        ])
    }
}
