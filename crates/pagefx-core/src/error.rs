//! Error type shared by the effect components.

use crate::surface::ElementId;

/// Errors raised while wiring effects to a document.
///
/// Running effects never fail; only initialization and configuration can.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EffectError {
    /// The tab, content and progress sequences differ in length.
    #[error("mismatched tab set: {tabs} tabs, {contents} content panels, {bars} progress bars")]
    MismatchedTabSet {
        tabs: usize,
        contents: usize,
        bars: usize,
    },

    /// A tab index outside of the tab set.
    #[error("tab {index} out of range for {count} tabs")]
    TabOutOfRange { index: usize, count: usize },

    /// An element id does not belong to the document.
    #[error("unknown element {0}")]
    UnknownElement(ElementId),

    /// Effect options are out of range after normalization.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A page description could not be read or parsed.
    #[error("invalid page description: {0}")]
    InvalidPage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_tab_set_message() {
        let err = EffectError::MismatchedTabSet {
            tabs: 3,
            contents: 2,
            bars: 3,
        };
        assert_eq!(
            err.to_string(),
            "mismatched tab set: 3 tabs, 2 content panels, 3 progress bars"
        );
    }

    #[test]
    fn unknown_element_message() {
        let err = EffectError::UnknownElement(ElementId(7));
        assert_eq!(err.to_string(), "unknown element #7");
    }
}
