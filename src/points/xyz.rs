use glam::Vec3;

use crate::error::SpriteError;

/// Parse whitespace-separated columns, taking the first three as `x y z`.
/// Blank lines and lines starting with `#` or `//` are skipped.
pub(super) fn parse(content: &str) -> Result<Vec<Vec3>, SpriteError> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| {
            !line.is_empty() && !line.starts_with('#') && !line.starts_with("//")
        })
        .map(|(line_no, line)| {
            parse_xyz(line.split_whitespace()).ok_or_else(|| {
                SpriteError::PointLoad(format!(
                    "line {line_no}: expected three numeric columns"
                ))
            })
        })
        .collect()
}

fn parse_xyz<'a>(mut columns: impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let mut next = || columns.next()?.parse::<f32>().ok();
    Some(Vec3::new(next()?, next()?, next()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_columns_are_ignored() {
        let points = parse("# x y z r g b\n1 2 3 255 0 0\n\n-1.5 0 2e1\n").unwrap();
        assert_eq!(
            points,
            vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.5, 0.0, 20.0)]
        );
    }

    #[test]
    fn short_rows_report_line_number() {
        let err = parse("1 2 3\n4 5\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }
}
