// Import the library functions
use min_area_drc::geometry::shapes::max_vertex;
use min_area_drc::geometry::{Orientation, Point, Rectangle};
use min_area_drc::layout::{CellDef, LayoutLibrary};
use min_area_drc::{BitmapMinAreaChecker, MinAreaChecker, Parameters, Violation};
use std::time::Instant;

#[cfg(test)]
mod tests {
    use super::*;

    fn check_cell(library: &LayoutLibrary, cell: &str, min_area: i64) -> Vec<Violation> {
        let checker = BitmapMinAreaChecker;
        let mut violations: Vec<Violation> = Vec::new();
        checker
            .check(&library.cell(cell).unwrap(), min_area, &checker.default_parameters(), &mut violations)
            .expect("check failed");
        violations
    }

    fn flat_library(rects: &[[i32; 4]]) -> LayoutLibrary {
        let mut top = CellDef::new("TOP");
        for &[a, b, c, d] in rects {
            top = top.with_rect(a, b, c, d);
        }
        let mut library = LayoutLibrary::new();
        library.add_cell(top).unwrap();
        library
    }

    fn summary(violations: &[Violation]) -> Vec<(i64, i32, i32)> {
        violations.iter().map(|v| (v.area, v.x, v.y)).collect()
    }

    /// Every reported shape must have its maximal vertex at the reported
    /// point and enclose exactly the reported area
    fn assert_shapes_consistent(violations: &[Violation]) {
        for v in violations {
            let shape = v.shape.as_ref().expect("tiles should be reported by default");
            assert_eq!(max_vertex(shape).unwrap(), Point::new(v.x, v.y).unwrap());
            assert_eq!(shape.area().unwrap(), v.area as i128);
        }
    }

    /// L-shape made of (0,0)-(1,2) and (1,0)-(2,1): one region of area 3
    #[test]
    fn test_l_shape_scenario() {
        let library = flat_library(&[[0, 0, 1, 2], [1, 0, 2, 1]]);
        let violations = check_cell(&library, "TOP", 4);
        assert_eq!(summary(&violations), vec![(3, 2, 1)]);
        assert_shapes_consistent(&violations);
    }

    /// Area equal to the minimum is compliant, one less is not
    #[test]
    fn test_min_area_boundary() {
        let library = flat_library(&[[0, 0, 3, 2], [3, 0, 4, 1]]);
        assert!(check_cell(&library, "TOP", 7).is_empty());
        assert_eq!(summary(&check_cell(&library, "TOP", 8)), vec![(7, 4, 1)]);
    }

    /// Far-apart regions are reported separately, largest vertex first
    #[test]
    fn test_disjoint_regions() {
        let library = flat_library(&[[0, 0, 2, 2], [1000, 500, 1001, 503], [1000, 0, 1001, 1]]);
        let violations = check_cell(&library, "TOP", 10);
        assert_eq!(
            summary(&violations),
            vec![(3, 1001, 503), (1, 1001, 1), (4, 2, 2)]
        );
        assert_shapes_consistent(&violations);
    }

    /// A top cell without rectangles yields nothing
    #[test]
    fn test_empty_layout() {
        let mut library = LayoutLibrary::new();
        library.add_cell(CellDef::new("EMPTY")).unwrap();
        library
            .add_cell(CellDef::new("TOP").with_instance("EMPTY", 5, 5, Orientation::R90))
            .unwrap();
        assert!(check_cell(&library, "TOP", i64::MAX).is_empty());
    }

    /// Overlapping rectangles count their shared area once
    #[test]
    fn test_overlaps_are_unioned() {
        let library = flat_library(&[[0, 0, 4, 4], [2, 2, 6, 6], [0, 0, 4, 4]]);
        let violations = check_cell(&library, "TOP", 100);
        assert_eq!(summary(&violations), vec![(28, 6, 6)]);
        assert_shapes_consistent(&violations);
    }

    /// Checking the JSON fixture through all hierarchy levels
    #[test]
    fn test_nested_fixture() {
        let start = Instant::now();
        let library = LayoutLibrary::load("tests/fixtures/nested_cells.json")
            .expect("Failed to load fixture");
        let top = library.top_cell().unwrap();

        let checker = BitmapMinAreaChecker;
        let mut violations: Vec<Violation> = Vec::new();
        checker
            .check(&top, 10, &checker.default_parameters(), &mut violations)
            .unwrap();
        println!("Checked fixture in {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);

        // Small square, PAIR at (100,100), mirrored PAIR at the origin;
        // the 20x20 square is compliant
        assert_eq!(
            summary(&violations),
            vec![(1, 201, 1), (8, 104, 101), (8, 4, 0)]
        );
        assert_shapes_consistent(&violations);

        let mut all: Vec<Violation> = Vec::new();
        checker
            .check(&top, i64::MAX, &checker.default_parameters(), &mut all)
            .unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all.iter().map(|v| v.area).sum::<i64>(), 1 + 8 + 8 + 400);
    }

    /// A cell placed under any orientation behaves like its flattened rectangles
    #[test]
    fn test_hierarchy_matches_flat_for_every_orientation() {
        let leaf_rects = [[0, 0, 1, 2], [1, 0, 2, 1], [5, 5, 7, 6]];
        let anchor = Point::new(10, 20).unwrap();

        for orient in Orientation::ALL {
            let mut leaf = CellDef::new("LEAF");
            for &[a, b, c, d] in &leaf_rects {
                leaf = leaf.with_rect(a, b, c, d);
            }
            let mut hierarchical = LayoutLibrary::new();
            hierarchical.add_cell(leaf).unwrap();
            hierarchical
                .add_cell(CellDef::new("MID").with_instance("LEAF", 0, 0, orient))
                .unwrap();
            hierarchical
                .add_cell(CellDef::new("TOP").with_instance("MID", anchor.x(), anchor.y(), Orientation::R0))
                .unwrap();

            let flat_rects: Vec<[i32; 4]> = leaf_rects
                .iter()
                .map(|&[a, b, c, d]| {
                    let r = Rectangle::from_coords(a, b, c, d)
                        .unwrap()
                        .transform(orient)
                        .translate(anchor)
                        .unwrap();
                    [r.min_x(), r.min_y(), r.max_x(), r.max_y()]
                })
                .collect();
            let flat = flat_library(&flat_rects);

            let from_hierarchy = check_cell(&hierarchical, "TOP", 5);
            let from_flat = check_cell(&flat, "TOP", 5);
            assert_eq!(from_hierarchy, from_flat, "orientation {}", orient);
            assert_eq!(from_hierarchy.len(), 2, "orientation {}", orient);
            assert_shapes_consistent(&from_hierarchy);
        }
    }

    /// Corner contact does not connect two regions
    #[test]
    fn test_diagonal_contact_is_two_regions() {
        let library = flat_library(&[[0, 0, 2, 2], [2, 2, 4, 4]]);
        let violations = check_cell(&library, "TOP", 5);
        assert_eq!(summary(&violations), vec![(4, 4, 4), (4, 2, 2)]);
    }

    #[test]
    fn test_report_tiles_disabled() {
        let library = flat_library(&[[0, 0, 1, 2], [1, 0, 2, 1]]);
        let checker = BitmapMinAreaChecker;
        let mut params = checker.default_parameters();
        params.set("ReportTiles", false);
        let mut violations: Vec<Violation> = Vec::new();
        checker
            .check(&library.cell("TOP").unwrap(), 4, &params, &mut violations)
            .unwrap();
        assert_eq!(summary(&violations), vec![(3, 2, 1)]);
        assert!(violations[0].shape.is_none());
    }

    /// Striped-run options are accepted and do not change the result
    #[test]
    fn test_stripe_options_have_no_effect() {
        let library = flat_library(&[[0, 0, 1, 2], [1, 0, 2, 1], [10, 10, 11, 11]]);
        let checker = BitmapMinAreaChecker;
        let mut params = checker.default_parameters();
        params.set("NumThreads", 8i64).set("RectsPerStripe", 1i64);

        let mut striped: Vec<Violation> = Vec::new();
        checker
            .check(&library.cell("TOP").unwrap(), 4, &params, &mut striped)
            .unwrap();
        assert_eq!(striped, check_cell(&library, "TOP", 4));
    }

    #[test]
    fn test_runs_are_deterministic() {
        let library = LayoutLibrary::load("tests/fixtures/nested_cells.json").unwrap();
        let first = check_cell(&library, "TOP", 1000);
        let second = check_cell(&library, "TOP", 1000);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_bad_parameter_value_is_an_error() {
        let library = flat_library(&[[0, 0, 1, 1]]);
        let (key, value) = Parameters::parse_assignment("NumThreads=-2").unwrap();
        let mut params = Parameters::new();
        params.set(key, value);
        let mut sink: Vec<Violation> = Vec::new();
        let result = BitmapMinAreaChecker.check(&library.cell("TOP").unwrap(), 4, &params, &mut sink);
        assert!(result.is_err());
    }
}
