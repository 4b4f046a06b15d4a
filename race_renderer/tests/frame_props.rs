// Frames stay consistent with the race they draw, whatever the maze.

use maze_race_renderer::{CellShade, Palette, PngRenderer, ShadedFrame, TextRenderer};
use maze_race_solver::Race;
use proptest::prelude::*;

fn odd_size() -> impl Strategy<Value = usize> {
    (2usize..12).prop_map(|n| 2 * n + 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn text_frame_shape_matches_grid(size in odd_size(), seed in any::<u64>(), ticks in 0usize..40) {
        let mut race = Race::seeded(size, seed).unwrap();
        race.start();
        for _ in 0..ticks {
            race.tick();
        }
        let text = TextRenderer::plain().with_gap(3).render_race(&race);
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), size + 2);
        for row in &lines[2..] {
            prop_assert!(row.starts_with('#'));
            prop_assert!(row.ends_with('#'));
        }
    }

    #[test]
    fn shades_agree_with_snapshot(size in odd_size(), seed in any::<u64>(), ticks in 1usize..60) {
        let mut race = Race::seeded(size, seed).unwrap();
        race.start();
        for _ in 0..ticks {
            race.tick();
        }
        for snapshot in [race.classic(), race.quantum()] {
            let frame = ShadedFrame::new(race.grid(), snapshot);
            let mut frontier = 0;
            for cell in race.grid().cells() {
                match frame.shade(cell) {
                    CellShade::Wall => prop_assert!(!cell.kind.is_open()),
                    CellShade::Visited | CellShade::Frontier | CellShade::Path => {
                        prop_assert!(snapshot.has_visited(cell.point()));
                        if frame.shade(cell) == CellShade::Frontier {
                            frontier += 1;
                        }
                    }
                    _ => {}
                }
            }
            prop_assert!(frontier <= snapshot.frontier.len());
        }
    }

    #[test]
    fn png_frame_dimensions(size in odd_size(), pixels in 1u32..6) {
        let race = Race::seeded(size, 0).unwrap();
        let renderer = PngRenderer::new(pixels).with_gap(pixels);
        let image = renderer.render_race(&race).unwrap();
        let side = size as u32 * pixels;
        prop_assert_eq!(image.dimensions(), (3 * pixels + 2 * side, 2 * pixels + side));
        let corner = image.get_pixel(0, 0).0;
        prop_assert_eq!(corner, Palette::classic().background().to_rgba8());
    }
}
