//! Formatting options

/// Formatting options for Yantra documents
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FormatOptions {
    /// Number of spaces per indentation level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

impl FormatOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_with_spaces_and_tabs() {
        let spaces = FormatOptions::default();
        assert_eq!(spaces.indent(2), "        ");

        let tabs = FormatOptions {
            tab_size: 8,
            insert_spaces: false,
        };
        assert_eq!(tabs.indent(2), "\t\t");
    }
}
