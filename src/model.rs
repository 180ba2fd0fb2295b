//! Tile data for the glyph field.
//! The grid generator lays tiles out on a virtual canvas larger than the
//! viewport; everything downstream treats the batch as immutable.

/// Fixed glyph palette, assigned cyclically by tile id.
pub const GLYPHS: [&str; 96] = [
    "🍽️", "☕", "🥣", "🍷", "🍴", "🥄", "🍵", "🥤",
    "🍜", "🍸", "🔪", "🥢", "🥗", "🥃", "🍛", "🍺",
    "🧀", "🍎", "🍊", "🍋", "🥖", "🍇", "🥐", "🍯",
    "🍕", "🌮", "🌯", "🥙", "🍔", "🌭", "🥪", "🍖",
    "🍗", "🥓", "🍳", "🥞", "🧇", "🍞", "🥨", "🥯",
    "🥜", "🌰", "🍯", "🥛", "🍼", "🍪", "🍩", "🧁",
    "🍰", "🎂", "🍫", "🍬", "🍭", "🍮", "🍯", "🍼",
    "🥤", "🧃", "🧉", "🧊", "🥛", "🍾", "🍷", "☕",
    "🍶", "🍾", "🍷", "🍸", "🍹", "🍺", "🍻", "🥂",
    "🥃", "🧊", "🍾", "🍷", "🍸", "🍹", "🍺", "🍻",
    "🥂", "🥃", "🧊", "🍾", "🍷", "🍸", "🍹", "🍺",
    "🍻", "🥂", "🥃", "🧊", "🍾", "🍷", "🍸", "🍹",
];

/// Grid cell pitch in px.
pub const SPACING: f64 = 200.0;
/// Tile edge length before the per-tile multiplier.
pub const BASE_TILE_SIZE: f64 = 80.0;
/// Glyph font size before the per-tile multiplier.
pub const BASE_FONT_SIZE: f64 = 100.0;
/// Vertical brick offset applied to odd columns.
pub const COLUMN_STAGGER: f64 = SPACING / 3.0;
/// Extra columns/rows beyond the viewport (2 per side) to tolerate panning.
pub const GRID_BUFFER_CELLS: u32 = 4;
/// Pan travel limit from the rest position, both axes.
pub const DRAG_BOUND: f64 = 500.0;
/// Fraction of raw pointer movement absorbed before it reaches the canvas.
pub const DRAG_RESISTANCE: f64 = 0.1;
pub const ENTRANCE_DURATION_MS: f64 = 500.0;
pub const ENTRANCE_DELAY_MAX_MS: f64 = 500.0;
pub const ENTRANCE_OVERSHOOT: f64 = 1.7;
pub const VISIBILITY_RADIUS: f64 = 100.0;

/// One grid cell's visual and positional data. Immutable after generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Row-major index; unique within one generated batch.
    pub id: u32,
    pub glyph: &'static str,
    /// Top-left corner in virtual canvas coordinates.
    pub x: f64,
    pub y: f64,
    /// Edge length in px (square).
    pub size: f64,
    pub font_size: f64,
}

/// Lay out a tile batch covering the viewport plus a pan buffer.
///
/// The random source supplies the per-tile size multipliers (uniform in
/// `[0.5, 1.0)` given values in `[0, 1)`); pass `js_sys::Math::random` in the
/// app, or a deterministic closure in tests. Multipliers are pre-sampled once
/// per batch so layout arithmetic stays branch-free in the loop.
pub fn generate_tiles(
    viewport_w: f64,
    viewport_h: f64,
    mut rand: impl FnMut() -> f64,
) -> Vec<Tile> {
    let cols = (viewport_w / SPACING).ceil() as u32 + GRID_BUFFER_CELLS;
    let rows = (viewport_h / SPACING).ceil() as u32 + GRID_BUFFER_CELLS;

    // Centre the oversized grid on the viewport.
    let offset_x = (viewport_w - cols as f64 * SPACING) / 2.0;
    let offset_y = (viewport_h - rows as f64 * SPACING) / 2.0;

    let count = (rows * cols) as usize;
    let multipliers: Vec<f64> = (0..count).map(|_| 0.5 + rand() * 0.5).collect();

    let mut tiles = Vec::with_capacity(count);
    for row in 0..rows {
        for col in 0..cols {
            let id = row * cols + col;
            let stagger = if col % 2 == 1 { COLUMN_STAGGER } else { 0.0 };
            let m = multipliers[id as usize];
            tiles.push(Tile {
                id,
                glyph: GLYPHS[id as usize % GLYPHS.len()],
                x: col as f64 * SPACING + offset_x,
                y: row as f64 * SPACING + offset_y + stagger,
                size: (BASE_TILE_SIZE * m).floor(),
                font_size: (BASE_FONT_SIZE * m).floor(),
            });
        }
    }
    tiles
}

/// Re-render gate: true iff the batches differ in length or any tile differs
/// positionally. `font_size` is not compared; it tracks `size` through the
/// shared multiplier.
pub fn tiles_differ(prev: &[Tile], next: &[Tile]) -> bool {
    if prev.len() != next.len() {
        return true;
    }
    prev.iter().zip(next).any(|(a, b)| {
        a.id != b.id || a.x != b.x || a.y != b.y || a.size != b.size || a.glyph != b.glyph
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(m: f64) -> impl FnMut() -> f64 {
        move || m
    }

    // Cheap deterministic sequence in [0, 1).
    fn counter() -> impl FnMut() -> f64 {
        let mut k: u32 = 0;
        move || {
            k = k.wrapping_mul(1664525).wrapping_add(1013904223);
            (k >> 8) as f64 / (1u32 << 24) as f64
        }
    }

    #[test]
    fn count_matches_buffered_grid() {
        let tiles = generate_tiles(800.0, 600.0, fixed(0.0));
        // ceil(800/200)+4 = 8 cols, ceil(600/200)+4 = 7 rows
        assert_eq!(tiles.len(), 56);
    }

    #[test]
    fn zero_viewport_still_produces_buffer_grid() {
        let tiles = generate_tiles(0.0, 0.0, fixed(0.0));
        assert_eq!(tiles.len(), 16);
    }

    #[test]
    fn ids_are_unique_and_dense() {
        let tiles = generate_tiles(1024.0, 768.0, counter());
        let mut ids: Vec<u32> = tiles.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tiles.len());
        assert_eq!(ids.first(), Some(&0));
        assert_eq!(*ids.last().unwrap(), tiles.len() as u32 - 1);
    }

    #[test]
    fn sizes_stay_in_multiplier_range() {
        let tiles = generate_tiles(800.0, 600.0, counter());
        for t in &tiles {
            assert!(t.size >= 40.0 && t.size < 80.0, "size {} out of range", t.size);
            assert!(
                t.font_size >= 50.0 && t.font_size < 100.0,
                "font_size {} out of range",
                t.font_size
            );
        }
    }

    #[test]
    fn odd_columns_are_staggered_by_a_third_cell() {
        let tiles = generate_tiles(800.0, 600.0, fixed(0.5));
        // row 0: col 0 unstaggered, col 1 staggered.
        assert!((tiles[1].y - tiles[0].y - SPACING / 3.0).abs() < 1e-9);
        assert_eq!(tiles[2].y, tiles[0].y);
    }

    #[test]
    fn glyphs_cycle_through_the_palette() {
        let tiles = generate_tiles(3000.0, 3000.0, fixed(0.5));
        assert!(tiles.len() > GLYPHS.len());
        for t in &tiles {
            assert_eq!(t.glyph, GLYPHS[t.id as usize % GLYPHS.len()]);
        }
    }

    #[test]
    fn generation_is_deterministic_given_the_random_source() {
        let a = generate_tiles(800.0, 600.0, counter());
        let b = generate_tiles(800.0, 600.0, counter());
        assert_eq!(a, b);
    }

    #[test]
    fn gate_ignores_a_rebuilt_identical_batch() {
        let a = generate_tiles(800.0, 600.0, fixed(0.25));
        let b = a.clone();
        assert!(!tiles_differ(&a, &b));
    }

    #[test]
    fn gate_fires_on_positional_changes() {
        let a = generate_tiles(800.0, 600.0, fixed(0.25));
        let mut b = a.clone();
        b[3].x += 1.0;
        assert!(tiles_differ(&a, &b));

        let mut c = a.clone();
        c.pop();
        assert!(tiles_differ(&a, &c));
    }

    #[test]
    fn gate_ignores_font_size_only_changes() {
        let a = generate_tiles(800.0, 600.0, fixed(0.25));
        let mut b = a.clone();
        b[0].font_size += 5.0;
        assert!(!tiles_differ(&a, &b));
    }
}
