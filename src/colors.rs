/// ANSI color codes for the text report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub header: &'static str, // Bold cyan for "Pipeline <id>" lines
    pub id: &'static str,     // Green for record ids
    pub empty: &'static str,  // Dim for pipelines without a resolvable chain
    pub reset: &'static str,  // Reset to default color
}

impl ColorScheme {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                header: "\x1b[1;36m",
                id: "\x1b[32m",
                empty: "\x1b[2m",
                reset: "\x1b[0m",
            }
        } else {
            // All empty strings for no-color mode
            Self {
                header: "",
                id: "",
                empty: "",
                reset: "",
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_scheme_is_empty() {
        let scheme = ColorScheme::new(false);
        assert!(!scheme.is_enabled());
        assert_eq!(scheme.header, "");
        assert_eq!(scheme.id, "");
    }

    #[test]
    fn test_color_scheme_uses_ansi() {
        let scheme = ColorScheme::new(true);
        assert!(scheme.is_enabled());
        assert!(scheme.header.starts_with("\x1b["));
        assert_eq!(scheme.reset, "\x1b[0m");
    }
}
