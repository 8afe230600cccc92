//! Per-page superscript summary shown in the footer.

/// Counts above this are flagged for manual review.
pub const HIGH_DENSITY_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityTier {
    None,
    Low,
    Moderate,
    High,
}

impl DensityTier {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => DensityTier::None,
            1..=2 => DensityTier::Low,
            3..=HIGH_DENSITY_THRESHOLD => DensityTier::Moderate,
            _ => DensityTier::High,
        }
    }

    pub fn color(self) -> iced::Color {
        match self {
            DensityTier::None => iced::Color::from_rgb(0.61, 0.64, 0.69),
            DensityTier::Low => iced::Color::from_rgb(0.29, 0.87, 0.5),
            DensityTier::Moderate => iced::Color::from_rgb(0.98, 0.8, 0.08),
            DensityTier::High => iced::Color::from_rgb(0.97, 0.44, 0.44),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAnalysis {
    pub page: u32,
    pub total_pages: Option<u32>,
    pub superscripts: usize,
}

impl PageAnalysis {
    pub fn tier(&self) -> DensityTier {
        DensityTier::from_count(self.superscripts)
    }

    pub fn heading(&self) -> String {
        format!("Page {} Analysis:", self.page)
    }

    pub fn message(&self) -> String {
        match self.superscripts {
            0 => "No superscripts detected".to_string(),
            1 => "1 superscript found".to_string(),
            n if n <= HIGH_DENSITY_THRESHOLD => format!("{n} superscripts found"),
            n => format!("High density: {n} superscripts"),
        }
    }

    pub fn needs_review(&self) -> bool {
        self.superscripts > HIGH_DENSITY_THRESHOLD
    }

    pub fn review_banner(&self) -> Option<&'static str> {
        self.needs_review()
            .then_some("High superscript density detected - manual review recommended")
    }

    pub fn progress(&self) -> String {
        match self.total_pages {
            Some(total) => format!("Progress: {} / {}", self.page, total),
            None => format!("Progress: {} / ?", self.page),
        }
    }
}

/// Toolbar badge text, `N superscript(s)`.
pub fn badge_label(count: usize) -> String {
    if count == 1 {
        "1 superscript".to_string()
    } else {
        format!("{count} superscripts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(superscripts: usize) -> PageAnalysis {
        PageAnalysis {
            page: 3,
            total_pages: Some(12),
            superscripts,
        }
    }

    #[test]
    fn messages_follow_count() {
        assert_eq!(analysis(0).message(), "No superscripts detected");
        assert_eq!(analysis(1).message(), "1 superscript found");
        assert_eq!(analysis(4).message(), "4 superscripts found");
        assert_eq!(analysis(5).message(), "5 superscripts found");
        assert_eq!(analysis(6).message(), "High density: 6 superscripts");
    }

    #[test]
    fn tiers_split_at_two_and_five() {
        assert_eq!(DensityTier::from_count(0), DensityTier::None);
        assert_eq!(DensityTier::from_count(2), DensityTier::Low);
        assert_eq!(DensityTier::from_count(3), DensityTier::Moderate);
        assert_eq!(DensityTier::from_count(5), DensityTier::Moderate);
        assert_eq!(DensityTier::from_count(6), DensityTier::High);
    }

    #[test]
    fn banner_only_above_threshold() {
        assert!(analysis(5).review_banner().is_none());
        assert!(analysis(6).review_banner().is_some());
    }

    #[test]
    fn progress_and_badge_labels() {
        assert_eq!(analysis(0).progress(), "Progress: 3 / 12");
        let unknown = PageAnalysis {
            total_pages: None,
            ..analysis(0)
        };
        assert_eq!(unknown.progress(), "Progress: 3 / ?");
        assert_eq!(analysis(0).heading(), "Page 3 Analysis:");
        assert_eq!(badge_label(1), "1 superscript");
        assert_eq!(badge_label(0), "0 superscripts");
    }
}
