use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;
use crate::renderers::Renderer;

/// Fixed direction probe order of the solver: west, east, north, south.
/// Any fixed order is correct; on a perfect maze it only decides which DFS
/// trace gets visualised, never whether a path is found.
pub const PROBE_ORDER: [CompassPrimary; 4] = [
    CompassPrimary::West,
    CompassPrimary::East,
    CompassPrimary::North,
    CompassPrimary::South,
];

/// Depth-first search from the entrance cell to the exit cell, moving only
/// through passages (absent walls) and never revisiting a cell.
///
/// Each advance and each backtrack out of a dead end is reported to the
/// renderer as a move / undo-move event. Returns the entrance-to-exit path,
/// or None when no path exists - an ordinary outcome, not an error: on a
/// perfect maze it cannot happen, but the search does not assume one.
///
/// An explicit trail stack replaces call recursion; each frame records how
/// many probe directions it has tried so far, so the ordering matches the
/// recursive formulation exactly.
pub fn dfs_solve(grid: &mut Grid,
                 renderer: &mut dyn Renderer)
                 -> Option<Vec<Cartesian2DCoordinate>> {
    let start = grid.entrance();
    let goal = grid.exit();

    grid.cell_mut(start).expect("entrance is in bounds").visited = true;
    if start == goal {
        return Some(vec![start]);
    }

    let mut trail: Vec<(Cartesian2DCoordinate, usize)> = vec![(start, 0)];

    while let Some(&(current, directions_tried)) = trail.last() {

        if directions_tried == PROBE_ORDER.len() {
            // Dead end - every direction exhausted. Undo the move that got us here.
            trail.pop();
            if let Some(&(parent, _)) = trail.last() {
                notify_move(grid, renderer, current, parent, true);
            }
            continue;
        }
        trail.last_mut().expect("trail is non-empty").1 += 1;

        let direction = PROBE_ORDER[directions_tried];
        let next = match grid.neighbour_at_direction(current, direction) {
            Some(next) => next,
            None => continue, // grid boundary
        };
        if grid.cell(next).expect("neighbour is in bounds").visited
           || !grid.is_open(current, direction) {
            continue;
        }

        grid.cell_mut(next).expect("neighbour is in bounds").visited = true;
        notify_move(grid, renderer, current, next, false);

        trail.push((next, 0));
        if next == goal {
            return Some(trail.iter().map(|&(coord, _)| coord).collect());
        }
    }

    None
}

fn notify_move(grid: &Grid,
               renderer: &mut dyn Renderer,
               from: Cartesian2DCoordinate,
               to: Cartesian2DCoordinate,
               undo: bool) {
    let from_cell = *grid.cell(from).expect("move source is in bounds");
    let to_cell = *grid.cell(to).expect("move target is in bounds");
    renderer.draw_move(&from_cell, &to_cell, undo);
    renderer.tick();
}
