use wordpath_core::{Coord, Grid, GridPos};

/// Grid as text, one row per line. Hidden noise shows as `.`, cells for
/// which `marked` holds are bracketed.
pub fn render_grid(grid: &Grid, marked: impl Fn(GridPos) -> bool) -> String {
    let size: Coord = grid.size();
    let mut out = String::new();
    for row in 0..size {
        for col in 0..size {
            let pos = GridPos::new(row, col);
            let Some(cell) = grid.get(pos) else {
                continue;
            };
            let letter = if cell.is_hidden_noise { '.' } else { cell.letter };
            if marked(pos) {
                out.push('[');
                out.push(letter);
                out.push(']');
            } else {
                out.push(' ');
                out.push(letter);
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

pub fn format_pos(pos: GridPos) -> String {
    format!("({}, {})", pos.row, pos.col)
}
