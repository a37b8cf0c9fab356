// src/rules.rs
// Rule families, named patterns, classic line types and the per-game rule snapshot.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Classic,
    Modern,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Classic, Category::Modern];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::Modern => "modern",
        }
    }
}

/// The selected winning pattern. `Lines` is the classic line-counting mode;
/// every other variant is a fixed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Lines,
    FullHouse,
    TShape,
    UShape,
    XShape,
    PlusSign,
    Diamond,
    OneLine,
    TwoLines,
    ThreeLines,
}

impl Pattern {
    pub const ALL: [Pattern; 10] = [
        Pattern::Lines,
        Pattern::FullHouse,
        Pattern::TShape,
        Pattern::UShape,
        Pattern::XShape,
        Pattern::PlusSign,
        Pattern::Diamond,
        Pattern::OneLine,
        Pattern::TwoLines,
        Pattern::ThreeLines,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Pattern::Lines => "lines",
            Pattern::FullHouse => "full_house",
            Pattern::TShape => "t_shape",
            Pattern::UShape => "u_shape",
            Pattern::XShape => "x_shape",
            Pattern::PlusSign => "plus_sign",
            Pattern::Diamond => "diamond",
            Pattern::OneLine => "one_line",
            Pattern::TwoLines => "two_lines",
            Pattern::ThreeLines => "three_lines",
        }
    }

    /// Classic games accept any pattern (anything but full house counts lines);
    /// modern games accept every named shape but not `lines`.
    pub fn is_available_in(self, category: Category) -> bool {
        match category {
            Category::Classic => true,
            Category::Modern => self != Pattern::Lines,
        }
    }
}

/// Classic line units, declared in scan priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Horizontal,
    Vertical,
    Diagonal,
    FourCorners,
    SmallCorners,
    Plus,
    X,
}

impl LineType {
    pub const ALL: [LineType; 7] = [
        LineType::Horizontal,
        LineType::Vertical,
        LineType::Diagonal,
        LineType::FourCorners,
        LineType::SmallCorners,
        LineType::Plus,
        LineType::X,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LineType::Horizontal => "horizontal",
            LineType::Vertical => "vertical",
            LineType::Diagonal => "diagonal",
            LineType::FourCorners => "four_corners",
            LineType::SmallCorners => "small_corners",
            LineType::Plus => "plus",
            LineType::X => "x",
        }
    }
}

macro_rules! impl_names {
    ($ty:ty, $err:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let name = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
                Self::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == name)
                    .ok_or_else(|| ConfigError::$err(s.trim().to_string()))
            }
        }
    };
}

impl_names!(Category, UnknownCategory);
impl_names!(Pattern, UnknownPattern);
impl_names!(LineType, UnknownLineType);

/// Rules for one game, snapshotted before the first draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleConfig {
    category: Category,
    selected_pattern: Pattern,
    classic_lines_target: u32,
    classic_selected_line_types: BTreeSet<LineType>,
}

impl RuleConfig {
    fn build(
        category: Category,
        selected_pattern: Pattern,
        classic_lines_target: u32,
        classic_selected_line_types: impl IntoIterator<Item = LineType>,
    ) -> Self {
        RuleConfig {
            category,
            selected_pattern,
            classic_lines_target: classic_lines_target.max(1),
            classic_selected_line_types: classic_selected_line_types.into_iter().collect(),
        }
    }

    /// Builds a rule set, clamping the lines target to at least one and
    /// rejecting a pattern the category does not offer.
    pub fn new(
        category: Category,
        selected_pattern: Pattern,
        classic_lines_target: u32,
        classic_selected_line_types: impl IntoIterator<Item = LineType>,
    ) -> Result<Self, ConfigError> {
        if !selected_pattern.is_available_in(category) {
            return Err(ConfigError::PatternNotInCategory {
                category: category.to_string(),
                pattern: selected_pattern.to_string(),
            });
        }
        Ok(Self::build(
            category,
            selected_pattern,
            classic_lines_target,
            classic_selected_line_types,
        ))
    }

    pub fn classic_lines(target: u32, line_types: impl IntoIterator<Item = LineType>) -> Self {
        Self::build(Category::Classic, Pattern::Lines, target, line_types)
    }

    pub fn classic_full_house() -> Self {
        Self::build(Category::Classic, Pattern::FullHouse, 1, [])
    }

    pub fn modern(pattern: Pattern) -> Result<Self, ConfigError> {
        Self::new(Category::Modern, pattern, 1, [])
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn selected_pattern(&self) -> Pattern {
        self.selected_pattern
    }

    pub fn classic_lines_target(&self) -> u32 {
        self.classic_lines_target
    }

    pub fn classic_selected_line_types(&self) -> &BTreeSet<LineType> {
        &self.classic_selected_line_types
    }

    /// Short human-readable summary, used in logs.
    pub fn describe(&self) -> String {
        match (self.category, self.selected_pattern) {
            (Category::Classic, Pattern::FullHouse) | (Category::Modern, _) => {
                format!("{} {}", self.category, self.selected_pattern)
            }
            (Category::Classic, _) => {
                let types: Vec<&str> = self
                    .classic_selected_line_types
                    .iter()
                    .map(|line_type| line_type.as_str())
                    .collect();
                format!(
                    "classic {} line(s) from [{}]",
                    self.classic_lines_target,
                    types.join(", ")
                )
            }
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::classic_lines(1, [LineType::Horizontal, LineType::Vertical, LineType::Diagonal])
    }
}
