// Grid index and coordinate remapping for row-major W×H grids.
//
// For source index `i = row*W + col`, the destination index in the rotated
// grid (whose width is H for quarter turns) is:
//
//   90°:  H*(i+1) - floor(i/W)*(W*H+1) - 1   = H*(col+1) - 1 - row
//   180°: W*H - 1 - i
//   270°: H*(W-1-i) + floor(i/W)*(H*W+1)     = H*(W-1-col) + row
//
// The right-hand forms are what is computed here; they stay non-negative in
// unsigned arithmetic.

use super::rotation::Rotation;

/// Dimensions of a `width × height` grid after `rotation`.
pub fn rotated_dimensions(width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    if rotation.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Destination index of source index `i` in a `width × height` grid.
///
/// `i` must be below `width * height`.
#[inline]
pub fn dest_index(i: usize, width: usize, height: usize, rotation: Rotation) -> usize {
    debug_assert!(i < width * height, "index {i} outside {width}x{height} grid");
    let row = i / width;
    let col = i % width;
    match rotation {
        Rotation::Deg0 => i,
        Rotation::Deg90 => height * (col + 1) - 1 - row,
        Rotation::Deg180 => width * height - 1 - i,
        Rotation::Deg270 => height * (width - 1 - col) + row,
    }
}

/// New `(x, y)` for a cell at `(x, y)` in a `width × height` grid.
/// Returns `None` when the cell is outside the grid.
pub fn rotate_position(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rotation: Rotation,
) -> Option<(u32, u32)> {
    if x >= width || y >= height {
        return None;
    }
    Some(match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (height - 1 - y, x),
        Rotation::Deg180 => (width - 1 - x, height - 1 - y),
        Rotation::Deg270 => (y, width - 1 - x),
    })
}

/// Copy `src` into a freshly allocated rotated grid, passing every cell
/// through `map` along the way. `map` receives the source index.
///
/// The destination is a separate buffer: destination indices are not visited
/// in order, so rotating in place would overwrite cells not yet read.
pub fn remap_with<T, F>(src: &[T], width: usize, height: usize, rotation: Rotation, mut map: F) -> Vec<T>
where
    T: Copy + Default,
    F: FnMut(usize, T) -> T,
{
    debug_assert_eq!(src.len(), width * height);
    let mut dest = vec![T::default(); src.len()];
    for (i, &cell) in src.iter().enumerate() {
        dest[dest_index(i, width, height, rotation)] = map(i, cell);
    }
    dest
}

/// Rotate a grid without changing its cells.
pub fn remap<T: Copy + Default>(src: &[T], width: usize, height: usize, rotation: Rotation) -> Vec<T> {
    remap_with(src, width, height, rotation, |_, cell| cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The closed forms, evaluated in signed arithmetic.
    fn closed_form(i: i64, w: i64, h: i64, rotation: Rotation) -> i64 {
        match rotation {
            Rotation::Deg0 => i,
            Rotation::Deg90 => h * (i + 1) - (i / w) * (w * h + 1) - 1,
            Rotation::Deg180 => w * h - 1 - i,
            Rotation::Deg270 => h * (w - 1 - i) + (i / w) * (h * w + 1),
        }
    }

    #[test]
    fn matches_closed_forms() {
        for (w, h) in [(1, 1), (2, 2), (3, 2), (20, 15), (7, 13)] {
            for rot in Rotation::ALL {
                for i in 0..w * h {
                    assert_eq!(
                        dest_index(i, w, h, rot) as i64,
                        closed_form(i as i64, w as i64, h as i64, rot),
                        "i={i} {w}x{h} {rot}"
                    );
                }
            }
        }
    }

    #[test]
    fn dest_index_is_a_permutation() {
        let (w, h) = (5, 3);
        for rot in Rotation::ALL {
            let mut seen = vec![false; w * h];
            for i in 0..w * h {
                let d = dest_index(i, w, h, rot);
                assert!(!seen[d], "{rot}: {d} hit twice");
                seen[d] = true;
            }
        }
    }

    #[test]
    fn two_by_two_half_turn() {
        let rotated = remap(&[10u16, 20, 30, 40], 2, 2, Rotation::Deg180);
        assert_eq!(rotated, vec![40, 30, 20, 10]);
    }

    #[test]
    fn three_by_two_quarter_turn() {
        // a b c        d a
        // d e f   ->   e b
        //              f c
        let src = ['a', 'b', 'c', 'd', 'e', 'f'].map(|c| c as u32);
        let cw = remap(&src, 3, 2, Rotation::Deg90);
        assert_eq!(cw, ['d', 'a', 'e', 'b', 'f', 'c'].map(|c| c as u32).to_vec());
        let ccw = remap(&src, 3, 2, Rotation::Deg270);
        assert_eq!(ccw, ['c', 'f', 'b', 'e', 'a', 'd'].map(|c| c as u32).to_vec());
    }

    #[test]
    fn positions_follow_cells() {
        let (w, h) = (10u32, 8u32);
        assert_eq!(rotate_position(3, 1, w, h, Rotation::Deg90), Some((6, 3)));
        for rot in Rotation::ALL {
            let (nw, _) = rotated_dimensions(w, h, rot);
            for y in 0..h {
                for x in 0..w {
                    let (nx, ny) = rotate_position(x, y, w, h, rot).unwrap();
                    let src = (y * w + x) as usize;
                    let dest = (ny * nw + nx) as usize;
                    assert_eq!(dest_index(src, w as usize, h as usize, rot), dest);
                }
            }
        }
    }

    #[test]
    fn position_outside_grid() {
        assert_eq!(rotate_position(10, 0, 10, 8, Rotation::Deg90), None);
        assert_eq!(rotate_position(0, 8, 10, 8, Rotation::Deg0), None);
    }

    #[test]
    fn remap_with_sees_source_index() {
        let out = remap_with(&[1u16, 2, 3], 3, 1, Rotation::Deg180, |i, v| v * 10 + i as u16);
        assert_eq!(out, vec![32, 21, 10]);
    }
}
