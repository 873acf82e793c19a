use std::io::Cursor;

use glam::Vec3;
use pcd_rs::{DynReader, DynRecord, Field};

use crate::error::SpriteError;

/// Read a PCD file (ASCII or binary `DATA`) from its raw bytes. Only the
/// `x`, `y`, `z` fields are kept; their positions come from the header's
/// field list, so extra fields in any order are fine.
pub(super) fn parse(bytes: &[u8]) -> Result<Vec<Vec3>, SpriteError> {
    let reader =
        DynReader::from_reader(Cursor::new(bytes)).map_err(load_error)?;
    let columns = xyz_columns(
        reader
            .meta()
            .field_defs
            .iter()
            .map(|def| def.name.as_str()),
    )?;

    reader
        .map(|record| {
            let record = record.map_err(load_error)?;
            to_point(&record, columns)
        })
        .collect()
}

/// Field index of each of `x`, `y`, `z`.
fn xyz_columns<'a>(
    names: impl Iterator<Item = &'a str>,
) -> Result<[usize; 3], SpriteError> {
    let names: Vec<&str> = names.collect();
    let find = |axis: &str| {
        names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(axis))
            .ok_or_else(|| {
                SpriteError::PointLoad("pcd: FIELDS must contain x y z".into())
            })
    };
    Ok([find("x")?, find("y")?, find("z")?])
}

fn to_point(
    record: &DynRecord,
    columns: [usize; 3],
) -> Result<Vec3, SpriteError> {
    let mut coord = [0.0f32; 3];
    for (slot, &column) in coord.iter_mut().zip(&columns) {
        *slot = record
            .0
            .get(column)
            .and_then(first_value)
            .ok_or_else(|| {
                SpriteError::PointLoad(format!(
                    "pcd: field {column} has no value"
                ))
            })?;
    }
    Ok(Vec3::from(coord))
}

fn first_value(field: &Field) -> Option<f32> {
    match field {
        Field::F32(v) => v.first().copied(),
        Field::F64(v) => v.first().map(|&x| x as f32),
        Field::I8(v) => v.first().map(|&x| f32::from(x)),
        Field::I16(v) => v.first().map(|&x| f32::from(x)),
        Field::I32(v) => v.first().map(|&x| x as f32),
        Field::U8(v) => v.first().map(|&x| f32::from(x)),
        Field::U16(v) => v.first().map(|&x| f32::from(x)),
        Field::U32(v) => v.first().map(|&x| x as f32),
    }
}

fn load_error(err: impl std::fmt::Display) -> SpriteError {
    SpriteError::PointLoad(format!("pcd: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(
        fields: &str,
        size: &str,
        ty: &str,
        count: &str,
        points: usize,
        data: &str,
    ) -> String {
        format!(
            "# .PCD v0.7 - Point Cloud Data file format
VERSION 0.7
FIELDS {fields}
SIZE {size}
TYPE {ty}
COUNT {count}
WIDTH {points}
HEIGHT 1
VIEWPOINT 0 0 0 1 0 0 0
POINTS {points}
DATA {data}
"
        )
    }

    fn xyzi_header(points: usize, data: &str) -> String {
        header("x y z intensity", "4 4 4 4", "F F F F", "1 1 1 1", points, data)
    }

    #[test]
    fn ascii_points_are_read() {
        let content =
            format!("{}0.5 1 2 9\n-1 0 3.25 9\n", xyzi_header(2, "ascii"));
        let points = parse(content.as_bytes()).unwrap();
        assert_eq!(
            points,
            vec![Vec3::new(0.5, 1.0, 2.0), Vec3::new(-1.0, 0.0, 3.25)]
        );
    }

    #[test]
    fn binary_points_are_read() {
        let expected =
            [Vec3::new(0.25, -1.5, 2.0), Vec3::new(8.0, 0.0, -0.125)];
        let mut bytes = xyzi_header(expected.len(), "binary").into_bytes();
        for p in &expected {
            for value in [p.x, p.y, p.z, 7.0] {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
        assert_eq!(parse(&bytes).unwrap(), expected);
    }

    #[test]
    fn field_order_and_counts_are_respected() {
        let content = format!(
            "{}0 0 1 30 20 10\n",
            header("normal z y x", "4 4 4 4", "F F F F", "3 1 1 1", 1, "ascii")
        );
        assert_eq!(
            parse(content.as_bytes()).unwrap(),
            vec![Vec3::new(10.0, 20.0, 30.0)]
        );
    }

    #[test]
    fn integer_fields_are_converted() {
        let content = format!(
            "{}1 -2 3\n",
            header("x y z", "4 4 4", "I I I", "1 1 1", 1, "ascii")
        );
        assert_eq!(
            parse(content.as_bytes()).unwrap(),
            vec![Vec3::new(1.0, -2.0, 3.0)]
        );
    }

    #[test]
    fn missing_xyz_fields_are_rejected() {
        let content = format!(
            "{}1 2\n",
            header("rgb intensity", "4 4", "F F", "1 1", 1, "ascii")
        );
        let err = parse(content.as_bytes()).unwrap_err();
        assert!(matches!(err, SpriteError::PointLoad(_)));
    }

    #[test]
    fn truncated_rows_are_rejected() {
        let content = format!("{}1 2\n", xyzi_header(2, "ascii"));
        assert!(parse(content.as_bytes()).is_err());
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(parse(b"FIELDS x y z\n").is_err());
    }
}
