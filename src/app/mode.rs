use std::fmt;

/// What a popup selection will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Restore, // paste the chosen item
    Delete,  // remove the chosen item, or all
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Restore => write!(f, "PASTE"),
            SelectionMode::Delete => write!(f, "DELETE"),
        }
    }
}
