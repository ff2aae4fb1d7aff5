//! Plain-text and CSV views of learned tables

use std::path::Path;

use crate::{
    Result,
    environment::Grid,
    learning::{QTable, StateValueTable, ValueEstimates},
    types::{Action, Position},
    utils::first_argmax,
};

const VALUE_WIDTH: usize = 6;
const Q_CELL_WIDTH: usize = 30;

fn frame(grid: &Grid, cell_width: usize, mut cell: impl FnMut(Position) -> String) -> String {
    let rule = "-".repeat(grid.cols() * (cell_width + 3) + 1);
    let mut out = String::new();
    for row in 0..grid.rows() {
        out.push_str(&rule);
        out.push('\n');
        out.push_str("| ");
        for col in 0..grid.cols() {
            let text = cell(Position::new(row, col));
            out.push_str(&format!("{text:<cell_width$} | "));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

/// One value per cell; obstacles as `####`.
pub fn render_state_values(grid: &Grid, table: &StateValueTable) -> String {
    frame(grid, VALUE_WIDTH, |pos| {
        if grid.is_obstacle(pos) {
            "####".to_string()
        } else {
            table.get(pos).to_string()
        }
    })
}

/// All four action values per cell, arrow-prefixed in enumeration order.
pub fn render_action_values(grid: &Grid, table: &QTable) -> String {
    frame(grid, Q_CELL_WIDTH, |pos| {
        if grid.is_obstacle(pos) {
            "####".to_string()
        } else {
            Action::ALL
                .iter()
                .map(|&action| format!("{}{}", action.arrow(), table.get(pos, action)))
                .collect::<Vec<_>>()
                .join(" ")
        }
    })
}

/// Render whichever table the snapshot holds.
pub fn render(grid: &Grid, estimates: &ValueEstimates) -> String {
    match estimates {
        ValueEstimates::StateValues(table) => render_state_values(grid, table),
        ValueEstimates::ActionValues(table) => render_action_values(grid, table),
    }
}

/// Greedy action of a cell under the learned table.
///
/// For state values this is the move whose deterministic target has the
/// highest value; for Q-values the highest-valued action. Ties resolve in
/// [`Action::ALL`] order.
pub fn greedy_action(grid: &Grid, estimates: &ValueEstimates, position: Position) -> Action {
    let scores = match estimates {
        ValueEstimates::StateValues(table) => Action::ALL.map(|action| {
            let target = crate::environment::TransitionModel::apply(grid, position, action);
            table.get(target)
        }),
        ValueEstimates::ActionValues(table) => table.action_values(position),
    };
    Action::ALL[first_argmax(&scores).unwrap_or(0)]
}

/// Arrow map of the greedy policy: `G` goal, `H` hazard, `#` obstacle.
pub fn render_policy(grid: &Grid, estimates: &ValueEstimates) -> String {
    frame(grid, 1, |pos| {
        if pos == grid.goal() {
            "G".to_string()
        } else if pos == grid.hazard() {
            "H".to_string()
        } else if grid.is_obstacle(pos) {
            "#".to_string()
        } else {
            greedy_action(grid, estimates, pos).arrow().to_string()
        }
    })
}

/// Grid layout with `S` start, `G` goal, `H` hazard, `#` obstacle.
pub fn render_grid(grid: &Grid) -> String {
    frame(grid, 1, |pos| {
        let symbol = if pos == grid.start() {
            "S"
        } else if pos == grid.goal() {
            "G"
        } else if pos == grid.hazard() {
            "H"
        } else if grid.is_obstacle(pos) {
            "#"
        } else {
            "."
        };
        symbol.to_string()
    })
}

/// Write the table as CSV with columns `row,col[,action],value`.
pub fn write_csv<P: AsRef<Path>>(path: P, estimates: &ValueEstimates) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in estimates.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::UpdateRule;

    #[test]
    fn test_render_state_values_layout() {
        let grid = Grid::classic();
        let mut table = StateValueTable::new(&grid, 0.1);
        table.set(Position::new(0, 2), 0.812);
        let text = render_state_values(&grid, &table);
        let lines: Vec<_> = text.lines().collect();

        // rule, row, rule, row, rule, row, rule
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("| 0 "));
        assert!(lines[1].contains("0.812"));
        assert!(lines[1].trim_end().ends_with('|'));
        assert!(lines[3].contains("####"));
        assert!(lines[3].contains("-1"));
    }

    #[test]
    fn test_render_policy_marks_special_cells() {
        let grid = Grid::classic();
        let estimates = ValueEstimates::new(&grid, UpdateRule::QLearning, 0.1, 0.4);
        let text = render_policy(&grid, &estimates);
        assert!(text.contains('G'));
        assert!(text.contains('H'));
        assert!(text.contains('#'));
    }

    #[test]
    fn test_greedy_state_value_policy_points_at_goal() {
        let grid = Grid::classic();
        let estimates = ValueEstimates::new(&grid, UpdateRule::PolicyEvaluation, 0.1, 0.4);
        // Only the anchored goal is positive, so its neighbour steps right
        assert_eq!(
            greedy_action(&grid, &estimates, Position::new(0, 2)),
            Action::Right
        );
        // Every neighbour scores 0: first action in enumeration order
        assert_eq!(
            greedy_action(&grid, &estimates, Position::new(2, 0)),
            Action::Up
        );
    }

    #[test]
    fn test_write_csv_state_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.csv");
        let grid = Grid::classic();
        let estimates = ValueEstimates::new(&grid, UpdateRule::PolicyEvaluation, 0.1, 0.4);

        write_csv(&path, &estimates).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "row,col,value");
        assert_eq!(lines.len(), 1 + grid.rows() * grid.cols());
        assert!(lines.contains(&"0,3,1.0"));
        assert!(lines.contains(&"1,3,-1.0"));
    }

    #[test]
    fn test_render_grid() {
        let text = render_grid(&Grid::classic());
        let rows: Vec<_> = text.lines().filter(|l| l.starts_with('|')).collect();
        assert_eq!(rows[0], "| . | . | . | G |");
        assert_eq!(rows[1], "| . | # | . | H |");
        assert_eq!(rows[2], "| S | . | . | . |");
    }
}
