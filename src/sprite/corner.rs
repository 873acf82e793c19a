use glam::Vec2;

/// Vertex invocations issued per sprite (two triangles, triangle-list).
pub const VERTICES_PER_SPRITE: u32 = 6;

/// Local quad-space corner offsets, indexed by the per-instance vertex
/// index. Two counter-clockwise triangles sharing the `(1,-1)` to `(-1,1)`
/// diagonal cover `[-1, 1] x [-1, 1]`.
///
/// Must match `corner_offset` in `assets/shaders/modules/sprite.wgsl`.
pub const CORNER_OFFSETS: [Vec2; VERTICES_PER_SPRITE as usize] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
];

/// Corner offset for `vertex_index`.
///
/// The draw call guarantees `vertex_index < 6`. Debug builds assert it;
/// release builds wrap modulo 6 like the shader does, so a bad index
/// yields another corner rather than a panic.
#[inline]
#[must_use]
pub fn corner_offset(vertex_index: u32) -> Vec2 {
    debug_assert!(
        vertex_index < VERTICES_PER_SPRITE,
        "sprite vertex index {vertex_index} out of range"
    );
    CORNER_OFFSETS[(vertex_index % VERTICES_PER_SPRITE) as usize]
}

/// The corner table grouped into its two triangles.
#[must_use]
pub fn corner_triangles() -> [[Vec2; 3]; 2] {
    let c = CORNER_OFFSETS;
    [[c[0], c[1], c[2]], [c[3], c[4], c[5]]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(tri: [Vec2; 3]) -> f32 {
        0.5 * (tri[1] - tri[0]).perp_dot(tri[2] - tri[0])
    }

    fn contains(tri: [Vec2; 3], p: Vec2) -> bool {
        let d0 = (tri[1] - tri[0]).perp_dot(p - tri[0]);
        let d1 = (tri[2] - tri[1]).perp_dot(p - tri[1]);
        let d2 = (tri[0] - tri[2]).perp_dot(p - tri[2]);
        (d0 >= 0.0 && d1 >= 0.0 && d2 >= 0.0)
            || (d0 <= 0.0 && d1 <= 0.0 && d2 <= 0.0)
    }

    #[test]
    fn table_matches_expected_order() {
        let expected = [
            (-1.0, -1.0),
            (1.0, -1.0),
            (-1.0, 1.0),
            (-1.0, 1.0),
            (1.0, -1.0),
            (1.0, 1.0),
        ];
        for (i, (x, y)) in expected.into_iter().enumerate() {
            assert_eq!(corner_offset(i as u32), Vec2::new(x, y));
        }
    }

    #[test]
    fn components_are_unit_signed() {
        for c in CORNER_OFFSETS {
            assert!(c.x.abs() == 1.0 && c.y.abs() == 1.0);
        }
    }

    #[test]
    fn triangles_share_winding_and_tile_the_square() {
        let [a, b] = corner_triangles();
        let area_a = signed_area(a);
        let area_b = signed_area(b);
        assert!(area_a > 0.0 && area_b > 0.0, "both triangles CCW");
        assert_eq!(area_a + area_b, 4.0);
    }

    #[test]
    fn triangles_share_only_the_diagonal() {
        let [a, b] = corner_triangles();
        let shared: Vec<Vec2> =
            a.iter().filter(|p| b.contains(p)).copied().collect();
        assert_eq!(shared.len(), 2);
        assert!(shared.contains(&Vec2::new(1.0, -1.0)));
        assert!(shared.contains(&Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn interior_samples_hit_exactly_one_triangle() {
        let [a, b] = corner_triangles();
        let steps = 17;
        for i in 0..steps {
            for j in 0..steps {
                let p = Vec2::new(
                    -0.97 + 1.94 * i as f32 / (steps - 1) as f32,
                    -0.95 + 1.93 * j as f32 / (steps - 1) as f32,
                );
                if (p.x + p.y).abs() < 1e-4 {
                    continue;
                }
                let hits = u32::from(contains(a, p)) + u32::from(contains(b, p));
                assert_eq!(hits, 1, "sample {p} covered {hits} times");
            }
        }
    }

    #[test]
    fn outside_samples_are_uncovered() {
        let [a, b] = corner_triangles();
        for p in [
            Vec2::new(1.2, 0.0),
            Vec2::new(0.0, -1.5),
            Vec2::new(-1.01, -1.01),
        ] {
            assert!(!contains(a, p) && !contains(b, p));
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn out_of_range_index_wraps_in_release() {
        assert_eq!(corner_offset(7), CORNER_OFFSETS[1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn out_of_range_index_asserts_in_debug() {
        let _ = corner_offset(6);
    }
}
