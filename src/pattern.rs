// src/pattern.rs
// Win-pattern evaluation: decides whether a matched grid satisfies the game rules
// and which cells explain the win.

use serde::Serialize;

use crate::defs::{Cell, Grid, CENTER, GRID_SIZE};
use crate::rules::{Category, LineType, Pattern, RuleConfig};

/// Verdict for one check of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinResult {
    pub won: bool,
    pub highlight_mask: Grid<bool>,
}

impl WinResult {
    pub fn no_win() -> Self {
        WinResult {
            won: false,
            highlight_mask: [[false; GRID_SIZE]; GRID_SIZE],
        }
    }

    fn win(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut highlight_mask = [[false; GRID_SIZE]; GRID_SIZE];
        for (row, col) in cells {
            highlight_mask[row][col] = true;
        }
        WinResult { won: true, highlight_mask }
    }

    pub fn highlighted_cells(&self) -> Vec<Cell> {
        all_cells()
            .filter(|&(row, col)| self.highlight_mask[row][col])
            .collect()
    }
}

fn all_cells() -> impl Iterator<Item = Cell> {
    (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
}

fn row(r: usize) -> Vec<Cell> {
    (0..GRID_SIZE).map(|col| (r, col)).collect()
}

fn column(c: usize) -> Vec<Cell> {
    (0..GRID_SIZE).map(|row| (row, c)).collect()
}

fn main_diagonal() -> Vec<Cell> {
    (0..GRID_SIZE).map(|i| (i, i)).collect()
}

fn anti_diagonal() -> Vec<Cell> {
    (0..GRID_SIZE).map(|i| (i, GRID_SIZE - 1 - i)).collect()
}

fn four_corners() -> Vec<Cell> {
    let last = GRID_SIZE - 1;
    vec![(0, 0), (0, last), (last, 0), (last, last)]
}

fn small_corners() -> Vec<Cell> {
    let (near, far) = (CENTER - 1, CENTER + 1);
    vec![(near, near), (near, far), (far, near), (far, far)]
}

fn plus() -> Vec<Cell> {
    let mut cells = row(CENTER);
    cells.extend(column(CENTER));
    cells
}

fn x_cells() -> Vec<Cell> {
    let mut cells = main_diagonal();
    cells.extend(anti_diagonal());
    cells
}

fn diamond() -> Vec<Cell> {
    all_cells()
        .filter(|&(row, col)| {
            let distance = row.abs_diff(CENTER) + col.abs_diff(CENTER);
            distance == 0 || distance == CENTER
        })
        .collect()
}

/// Units a classic line type contributes, in scan order. Each unit counts once.
fn line_units(line_type: LineType) -> Vec<Vec<Cell>> {
    match line_type {
        LineType::Horizontal => (0..GRID_SIZE).map(row).collect(),
        LineType::Vertical => (0..GRID_SIZE).map(column).collect(),
        LineType::Diagonal => vec![main_diagonal(), anti_diagonal()],
        LineType::FourCorners => vec![four_corners()],
        LineType::SmallCorners => vec![small_corners()],
        LineType::Plus => vec![plus()],
        LineType::X => vec![x_cells()],
    }
}

/// Rows, columns, then the main and anti diagonals.
fn single_lines() -> Vec<Vec<Cell>> {
    let mut lines: Vec<Vec<Cell>> = (0..GRID_SIZE).map(row).collect();
    lines.extend((0..GRID_SIZE).map(column));
    lines.push(main_diagonal());
    lines.push(anti_diagonal());
    lines
}

fn is_complete(grid: &Grid<bool>, cells: &[Cell]) -> bool {
    cells.iter().all(|&(row, col)| grid[row][col])
}

/// Checks `grid` against `rules`. Pure: the center cell is treated as matched
/// whatever the input says, and nothing is remembered between calls.
pub fn evaluate(grid: &Grid<bool>, rules: &RuleConfig) -> WinResult {
    let mut grid = *grid;
    grid[CENTER][CENTER] = true;

    match rules.category() {
        Category::Classic => evaluate_classic(&grid, rules),
        Category::Modern => evaluate_modern(&grid, rules.selected_pattern()),
    }
}

fn evaluate_classic(grid: &Grid<bool>, rules: &RuleConfig) -> WinResult {
    if rules.selected_pattern() == Pattern::FullHouse {
        return full_house(grid);
    }

    let target = rules.classic_lines_target();
    let selected = rules.classic_selected_line_types();
    let mut achieved = 0;
    let mut highlighted: Vec<Cell> = Vec::new();

    for line_type in LineType::ALL.into_iter().filter(|line_type| selected.contains(line_type)) {
        for unit in line_units(line_type) {
            if !is_complete(grid, &unit) {
                continue;
            }
            achieved += 1;
            highlighted.extend(unit);
            if achieved >= target {
                return WinResult::win(highlighted);
            }
        }
    }

    WinResult::no_win()
}

fn evaluate_modern(grid: &Grid<bool>, pattern: Pattern) -> WinResult {
    let shape = match pattern {
        Pattern::FullHouse => return full_house(grid),
        Pattern::OneLine => return complete_lines(grid, single_lines(), 1),
        // Legacy presets: only full rows count.
        Pattern::TwoLines => return complete_lines(grid, (0..GRID_SIZE).map(row).collect(), 2),
        Pattern::ThreeLines => return complete_lines(grid, (0..GRID_SIZE).map(row).collect(), 3),
        Pattern::TShape => {
            let mut cells = row(0);
            cells.extend(column(CENTER));
            cells
        }
        Pattern::UShape => {
            let mut cells = column(0);
            cells.extend(column(GRID_SIZE - 1));
            cells.extend(row(GRID_SIZE - 1));
            cells
        }
        Pattern::XShape => x_cells(),
        Pattern::PlusSign => plus(),
        Pattern::Diamond => diamond(),
        // rejected for the modern category when the rules are built
        Pattern::Lines => return WinResult::no_win(),
    };

    if is_complete(grid, &shape) {
        WinResult::win(shape)
    } else {
        WinResult::no_win()
    }
}

fn full_house(grid: &Grid<bool>) -> WinResult {
    let cells: Vec<Cell> = all_cells().collect();
    if is_complete(grid, &cells) {
        WinResult::win(cells)
    } else {
        WinResult::no_win()
    }
}

/// Wins once `needed` of `lines` are complete, highlighting the first ones found.
fn complete_lines(grid: &Grid<bool>, lines: Vec<Vec<Cell>>, needed: usize) -> WinResult {
    let complete: Vec<Vec<Cell>> = lines
        .into_iter()
        .filter(|line| is_complete(grid, line))
        .take(needed)
        .collect();
    if complete.len() >= needed {
        WinResult::win(complete.into_iter().flatten())
    } else {
        WinResult::no_win()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid_with(cells: &[Cell]) -> Grid<bool> {
        let mut grid = [[false; GRID_SIZE]; GRID_SIZE];
        grid[CENTER][CENTER] = true;
        for &(row, col) in cells {
            grid[row][col] = true;
        }
        grid
    }

    fn mask_of(cells: &[Cell]) -> Grid<bool> {
        let mut mask = [[false; GRID_SIZE]; GRID_SIZE];
        for &(row, col) in cells {
            mask[row][col] = true;
        }
        mask
    }

    fn full_grid() -> Grid<bool> {
        [[true; GRID_SIZE]; GRID_SIZE]
    }

    fn center_only() -> Grid<bool> {
        grid_with(&[])
    }

    fn modern(pattern: Pattern) -> RuleConfig {
        RuleConfig::modern(pattern).unwrap()
    }

    fn all_rule_sets() -> Vec<RuleConfig> {
        let mut rules: Vec<RuleConfig> = Pattern::ALL
            .into_iter()
            .filter_map(|pattern| RuleConfig::modern(pattern).ok())
            .collect();
        assert_eq!(rules.len(), Pattern::ALL.len() - 1);
        rules.push(RuleConfig::classic_full_house());
        for line_type in LineType::ALL {
            rules.push(RuleConfig::classic_lines(1, [line_type]));
        }
        rules.push(RuleConfig::classic_lines(16, LineType::ALL));
        rules.push(RuleConfig::classic_lines(12, [LineType::Horizontal, LineType::Vertical, LineType::Diagonal]));
        rules
    }

    #[test]
    fn test_classic_single_row() {
        let grid = grid_with(&row(0));
        let rules = RuleConfig::classic_lines(1, [LineType::Horizontal]);
        let result = evaluate(&grid, &rules);
        assert!(result.won);
        assert_eq!(result.highlight_mask, mask_of(&row(0)));
    }

    #[test]
    fn test_classic_full_house_missing_corner() {
        let mut grid = full_grid();
        grid[4][4] = false;
        let rules = RuleConfig::new(Category::Classic, Pattern::FullHouse, 1, [LineType::Horizontal]).unwrap();
        assert_eq!(evaluate(&grid, &rules), WinResult::no_win());

        grid[4][4] = true;
        let result = evaluate(&grid, &rules);
        assert!(result.won);
        assert_eq!(result.highlighted_cells().len(), 25);
    }

    #[test]
    fn test_classic_full_house_ignores_line_settings() {
        // Four full rows would satisfy a line rule but not a full house.
        let mut cells = Vec::new();
        for r in 0..4 {
            cells.extend(row(r));
        }
        let grid = grid_with(&cells);
        let rules = RuleConfig::new(Category::Classic, Pattern::FullHouse, 1, LineType::ALL).unwrap();
        assert!(!evaluate(&grid, &rules).won);
    }

    #[test]
    fn test_classic_counts_across_line_types() {
        // Row 1 and column 3 are both complete.
        let mut cells = row(1);
        cells.extend(column(3));
        let grid = grid_with(&cells);

        let rules = RuleConfig::classic_lines(2, [LineType::Horizontal, LineType::Vertical]);
        let result = evaluate(&grid, &rules);
        assert!(result.won);
        assert_eq!(result.highlight_mask, mask_of(&cells));

        let rules = RuleConfig::classic_lines(2, [LineType::Horizontal]);
        assert!(!evaluate(&grid, &rules).won);

        let rules = RuleConfig::classic_lines(3, [LineType::Horizontal, LineType::Vertical]);
        assert!(!evaluate(&grid, &rules).won);
    }

    #[test]
    fn test_classic_short_circuit_highlights_first_units() {
        // Rows 0 and 4 plus column 0 are complete; target 2 stops after the rows.
        let mut cells = row(0);
        cells.extend(row(4));
        cells.extend(column(0));
        let grid = grid_with(&cells);

        let rules = RuleConfig::classic_lines(2, [LineType::Horizontal, LineType::Vertical]);
        let result = evaluate(&grid, &rules);
        assert!(result.won);
        let mut expected = row(0);
        expected.extend(row(4));
        assert_eq!(result.highlight_mask, mask_of(&expected));
    }

    #[test]
    fn test_classic_diagonals_count_separately() {
        let grid = grid_with(&x_cells());

        let rules = RuleConfig::classic_lines(2, [LineType::Diagonal]);
        assert!(evaluate(&grid, &rules).won);

        let rules = RuleConfig::classic_lines(1, [LineType::Diagonal]);
        let result = evaluate(&grid, &rules);
        assert_eq!(result.highlight_mask, mask_of(&main_diagonal()));

        // X is a single unit.
        let rules = RuleConfig::classic_lines(2, [LineType::X]);
        assert!(!evaluate(&grid, &rules).won);
        let rules = RuleConfig::classic_lines(1, [LineType::X]);
        assert!(evaluate(&grid, &rules).won);

        let rules = RuleConfig::classic_lines(3, [LineType::Diagonal, LineType::X]);
        assert!(evaluate(&grid, &rules).won);
    }

    #[test]
    fn test_classic_corner_units() {
        let grid = grid_with(&four_corners());
        assert!(evaluate(&grid, &RuleConfig::classic_lines(1, [LineType::FourCorners])).won);
        assert!(!evaluate(&grid, &RuleConfig::classic_lines(2, [LineType::FourCorners])).won);
        assert!(!evaluate(&grid, &RuleConfig::classic_lines(1, [LineType::SmallCorners])).won);

        let grid = grid_with(&small_corners());
        let result = evaluate(&grid, &RuleConfig::classic_lines(1, [LineType::SmallCorners]));
        assert!(result.won);
        assert_eq!(result.highlight_mask, mask_of(&[(1, 1), (1, 3), (3, 1), (3, 3)]));
    }

    #[test]
    fn test_classic_plus_needs_row_and_column() {
        let grid = grid_with(&row(CENTER));
        assert!(!evaluate(&grid, &RuleConfig::classic_lines(1, [LineType::Plus])).won);
        let grid = grid_with(&plus());
        assert!(evaluate(&grid, &RuleConfig::classic_lines(1, [LineType::Plus])).won);
    }

    #[test]
    fn test_classic_empty_line_types_never_win() {
        let rules = RuleConfig::classic_lines(1, []);
        assert_eq!(evaluate(&full_grid(), &rules), WinResult::no_win());
    }

    #[test]
    fn test_classic_unselected_types_are_ignored() {
        let grid = grid_with(&column(2));
        let rules = RuleConfig::classic_lines(1, [LineType::Horizontal, LineType::Diagonal]);
        assert!(!evaluate(&grid, &rules).won);
    }

    #[test]
    fn test_modern_x_shape_with_unmarked_center() {
        let mut grid = grid_with(&x_cells());
        grid[CENTER][CENTER] = false;
        let result = evaluate(&grid, &modern(Pattern::XShape));
        assert!(result.won);
        assert_eq!(result.highlight_mask, mask_of(&x_cells()));
    }

    #[test]
    fn test_modern_two_lines_counts_rows_only() {
        let mut cells = column(0);
        cells.extend(column(4));
        let grid = grid_with(&cells);
        assert!(!evaluate(&grid, &modern(Pattern::TwoLines)).won);

        let mut cells = row(1);
        cells.extend(row(3));
        let grid = grid_with(&cells);
        let result = evaluate(&grid, &modern(Pattern::TwoLines));
        assert!(result.won);
        assert_eq!(result.highlight_mask, mask_of(&cells));
        assert!(!evaluate(&grid, &modern(Pattern::ThreeLines)).won);

        cells.extend(row(4));
        let grid = grid_with(&cells);
        assert!(evaluate(&grid, &modern(Pattern::ThreeLines)).won);
    }

    #[test]
    fn test_modern_one_line_accepts_any_line() {
        for line in single_lines() {
            let grid = grid_with(&line);
            let result = evaluate(&grid, &modern(Pattern::OneLine));
            assert!(result.won, "line {line:?}");
            assert_eq!(result.highlight_mask, mask_of(&line));
        }
    }

    #[test]
    fn test_modern_shapes() {
        let mut t_cells = row(0);
        t_cells.extend(column(2));
        let mut u_cells = column(0);
        u_cells.extend(column(4));
        u_cells.extend(row(4));
        let diamond_cells = vec![(0, 2), (1, 1), (1, 3), (2, 0), (2, 2), (2, 4), (3, 1), (3, 3), (4, 2)];

        let cases = [
            (Pattern::TShape, t_cells),
            (Pattern::UShape, u_cells),
            (Pattern::PlusSign, plus()),
            (Pattern::Diamond, diamond_cells),
        ];

        for (pattern, cells) in cases {
            let rules = modern(pattern);
            let result = evaluate(&grid_with(&cells), &rules);
            assert!(result.won, "{pattern}");
            assert_eq!(result.highlight_mask, mask_of(&cells), "{pattern}");

            // Dropping any non-center cell breaks the shape.
            for &cell in cells.iter().filter(|&&cell| cell != (CENTER, CENTER)) {
                let partial: Vec<Cell> = cells.iter().copied().filter(|&c| c != cell).collect();
                assert_eq!(evaluate(&grid_with(&partial), &rules), WinResult::no_win(), "{pattern} without {cell:?}");
            }
        }
    }

    #[test]
    fn test_diamond_has_nine_cells() {
        let cells: HashSet<Cell> = diamond().into_iter().collect();
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn test_full_house_wins_everything() {
        for rules in all_rule_sets() {
            assert!(evaluate(&full_grid(), &rules).won, "{}", rules.describe());
        }
    }

    #[test]
    fn test_center_alone_never_wins() {
        for rules in all_rule_sets() {
            assert_eq!(evaluate(&center_only(), &rules), WinResult::no_win(), "{}", rules.describe());
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut cells = row(2);
        cells.extend(column(1));
        cells.extend(four_corners());
        let grid = grid_with(&cells);
        for rules in all_rule_sets() {
            let first = evaluate(&grid, &rules);
            let second = evaluate(&grid, &rules);
            assert_eq!(first, second);
        }
    }
}
