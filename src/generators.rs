use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::cells::{CompassPrimary, CoordinateSmallVec};
use crate::grid::Grid;
use crate::renderers::Renderer;

/// Open the maze at its boundary: clear the top wall of the entrance cell
/// and the bottom wall of the exit cell. These sides face no neighbouring
/// cell, so they are boundary openings rather than passage edges and leave
/// the interior wall invariant untouched.
pub fn open_entrance_and_exit(grid: &mut Grid, renderer: &mut dyn Renderer) {
    let entrance = grid.entrance();
    let exit = grid.exit();

    grid.cell_mut(entrance)
        .expect("entrance is in bounds")
        .remove_wall(CompassPrimary::North);
    grid.cell_mut(exit).expect("exit is in bounds").remove_wall(CompassPrimary::South);

    renderer.draw_cell(grid.cell(entrance).expect("entrance is in bounds"));
    renderer.draw_cell(grid.cell(exit).expect("exit is in bounds"));
    renderer.tick();
}

/// Apply the recursive backtracker maze generation algorithm to the grid.
///
/// From the entrance cell, repeatedly pick one unvisited neighbour of the
/// current cell uniformly at random, break the wall to it and continue from
/// there; when a cell has no unvisited neighbours left, fall back to the
/// cell it was reached from. Because a passage is only ever carved into an
/// unvisited cell, the passages form a spanning tree over the cells: every
/// cell reachable, no cycles, a perfect maze.
///
/// An explicit stack stands in for call recursion, with identical ordering:
/// neighbour discovery order is the grid's fixed N, S, E, W order and only
/// the choice among candidates consumes randomness. Depth is bounded by the
/// cell count.
///
/// When carving completes every `visited` flag is reset, so the solver
/// starts from a clean slate.
pub fn recursive_backtracker(grid: &mut Grid,
                             rng: &mut XorShiftRng,
                             renderer: &mut dyn Renderer) {
    let start = grid.entrance();
    grid.cell_mut(start).expect("entrance is in bounds").visited = true;

    let mut stack = Vec::with_capacity(grid.size());
    stack.push(start);

    while let Some(&current) = stack.last() {

        let unvisited: CoordinateSmallVec = grid.neighbours(current)
            .iter()
            .cloned()
            .filter(|&coord| !grid.cell(coord).expect("neighbours are in bounds").visited)
            .collect();

        if unvisited.is_empty() {
            // This branch is exhausted.
            stack.pop();
            continue;
        }

        let chosen = unvisited[rng.gen_range(0..unvisited.len())];
        grid.break_wall_between(current, chosen)
            .expect("unvisited neighbours are adjacent");
        grid.cell_mut(chosen).expect("neighbours are in bounds").visited = true;

        renderer.draw_cell(grid.cell(current).expect("current cell is in bounds"));
        renderer.draw_cell(grid.cell(chosen).expect("chosen cell is in bounds"));
        renderer.tick();

        stack.push(chosen);
    }

    grid.reset_visited();
}

#[cfg(test)]
mod tests {

    use petgraph::algo::connected_components;
    use petgraph::graph::UnGraph;
    use quickcheck::quickcheck;
    use rand::SeedableRng;

    use super::*;
    use crate::renderers::NullRenderer;
    use crate::units::{CellHeight, CellWidth, ColumnsCount, OffsetX, OffsetY, RowsCount};

    fn carved_grid(columns: usize, rows: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(OffsetX(0),
                                 OffsetY(0),
                                 ColumnsCount(columns),
                                 RowsCount(rows),
                                 CellWidth(10),
                                 CellHeight(10))
            .expect("valid test dimensions");
        let mut rng = XorShiftRng::seed_from_u64(seed);
        open_entrance_and_exit(&mut grid, &mut NullRenderer);
        recursive_backtracker(&mut grid, &mut rng, &mut NullRenderer);
        grid
    }

    // Independent check that the carved passages form a spanning tree over
    // the cells: one connected component with cells-1 edges.
    fn is_spanning_tree(grid: &Grid) -> bool {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..grid.size()).map(|_| graph.add_node(())).collect();
        for coord in grid.iter() {
            for &dir in &[CompassPrimary::East, CompassPrimary::South] {
                if let Some(neighbour) = grid.neighbour_at_direction(coord, dir) {
                    if grid.is_open(coord, dir) {
                        let a = nodes[grid.grid_coordinate_to_index(coord).unwrap()];
                        let b = nodes[grid.grid_coordinate_to_index(neighbour).unwrap()];
                        graph.add_edge(a, b, ());
                    }
                }
            }
        }
        connected_components(&graph) == 1 && graph.edge_count() == grid.size() - 1
    }

    #[test]
    fn entrance_and_exit_boundary_sides_are_opened() {
        let grid = carved_grid(8, 6, 1);
        assert!(!grid.cell(grid.entrance()).unwrap().has_north_wall);
        assert!(!grid.cell(grid.exit()).unwrap().has_south_wall);
    }

    #[test]
    fn facing_wall_flags_agree_for_every_adjacent_pair() {
        let grid = carved_grid(9, 7, 2);
        for coord in grid.iter() {
            for &dir in &[CompassPrimary::East, CompassPrimary::South] {
                if let Some(neighbour) = grid.neighbour_at_direction(coord, dir) {
                    let this_side = grid.cell(coord).unwrap().is_wall(dir);
                    let that_side = grid.cell(neighbour).unwrap().is_wall(dir.opposite());
                    assert_eq!(this_side, that_side,
                               "wall disagreement between {:?} and {:?}",
                               coord,
                               neighbour);
                }
            }
        }
    }

    #[test]
    fn carved_passages_form_a_spanning_tree() {
        let grid = carved_grid(10, 10, 3);
        assert_eq!(grid.passages_count(), grid.size() - 1);
        assert!(is_spanning_tree(&grid));
    }

    #[test]
    fn visited_flags_are_clear_after_carving() {
        let grid = carved_grid(6, 6, 4);
        assert!(grid.iter().all(|coord| !grid.cell(coord).unwrap().visited));
    }

    #[test]
    fn single_cell_grid_carves_no_passages() {
        let grid = carved_grid(1, 1, 5);
        assert_eq!(grid.passages_count(), 0);
        assert!(!grid.cell(grid.entrance()).unwrap().has_north_wall);
        assert!(!grid.cell(grid.exit()).unwrap().has_south_wall);
    }

    #[test]
    fn single_row_and_single_column_grids_are_fully_carved() {
        for &(columns, rows) in &[(8, 1), (1, 8)] {
            let grid = carved_grid(columns, rows, 6);
            assert_eq!(grid.passages_count(), grid.size() - 1);
            assert!(is_spanning_tree(&grid));
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_maze() {
        let wall_flags = |grid: &Grid| -> Vec<(bool, bool, bool, bool)> {
            grid.iter()
                .map(|coord| {
                    let cell = grid.cell(coord).unwrap();
                    (cell.has_north_wall,
                     cell.has_south_wall,
                     cell.has_east_wall,
                     cell.has_west_wall)
                })
                .collect()
        };
        let first = carved_grid(12, 9, 42);
        let second = carved_grid(12, 9, 42);
        assert_eq!(wall_flags(&first), wall_flags(&second));
    }

    #[test]
    fn quickcheck_any_seeded_carve_is_a_perfect_maze() {

        fn prop(width: u8, height: u8, seed: u64) -> bool {
            let columns = 1 + (width % 12) as usize;
            let rows = 1 + (height % 12) as usize;
            let grid = carved_grid(columns, rows, seed);
            grid.passages_count() == grid.size() - 1 && is_spanning_tree(&grid)
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn carving_emits_draw_events() {
        struct CountingRenderer {
            cells_drawn: usize,
            ticks: usize,
        }
        impl Renderer for CountingRenderer {
            fn draw_cell(&mut self, _: &crate::cells::Cell) {
                self.cells_drawn += 1;
            }
            fn draw_move(&mut self, _: &crate::cells::Cell, _: &crate::cells::Cell, _: bool) {}
            fn tick(&mut self) {
                self.ticks += 1;
            }
        }

        let mut grid = Grid::new(OffsetX(0),
                                 OffsetY(0),
                                 ColumnsCount(4),
                                 RowsCount(4),
                                 CellWidth(10),
                                 CellHeight(10))
            .unwrap();
        let mut renderer = CountingRenderer { cells_drawn: 0, ticks: 0 };
        let mut rng = XorShiftRng::seed_from_u64(7);
        recursive_backtracker(&mut grid, &mut rng, &mut renderer);

        // One wall break per spanning tree edge, two cell redraws per break.
        assert_eq!(renderer.cells_drawn, 2 * (grid.size() - 1));
        assert_eq!(renderer.ticks, grid.size() - 1);
    }
}
