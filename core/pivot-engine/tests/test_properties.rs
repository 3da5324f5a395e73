//! FILENAME: tests/test_properties.rs
//! Property tests: counts are conserved under partitioning and headers are
//! exactly the distinct values of their dimension.

use std::collections::HashSet;

use engine::{Dataset, Record, Value};
use pivot_engine::{build_pivot, FieldRef, Matrix};
use proptest::prelude::*;

const SPECIES: [&str; 4] = ["A", "B", "C", "D"];
const YEARS: [&str; 3] = ["2022", "2020", "2021"];

fn species() -> FieldRef {
    FieldRef::qualified("t", "s")
}

fn year() -> FieldRef {
    FieldRef::qualified("t", "y")
}

/// Records where either field may be missing.
fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (prop::option::of(0..SPECIES.len()), prop::option::of(0..YEARS.len())),
        0..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(s, y)| {
                let mut record = Record::new();
                if let Some(s) = s {
                    record.set("t.s", SPECIES[s]);
                }
                if let Some(y) = y {
                    record.set("t.y", YEARS[y]);
                }
                record
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn column_headers_are_distinct_in_first_seen_order(records in records_strategy()) {
        let mut expected: Vec<Value> = Vec::new();
        for r in &records {
            let v = r.get("t.s").clone();
            if !expected.contains(&v) {
                expected.push(v);
            }
        }
        let data = Dataset::loaded(records);
        let result = build_pivot(&data, &species().count(), Some(&species()), None).unwrap();
        prop_assert_eq!(result.column_headers.values(), expected.as_slice());
    }

    #[test]
    fn row_headers_are_distinct_and_sorted(records in records_strategy()) {
        let data = Dataset::loaded(records);
        let result = build_pivot(&data, &species().count(), None, Some(&year())).unwrap();
        let headers = result.row_headers.values();
        let unique: HashSet<&Value> = headers.iter().collect();
        prop_assert_eq!(unique.len(), headers.len());
        prop_assert!(headers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn column_vector_sums_to_scalar(records in records_strategy()) {
        let data = Dataset::loaded(records);
        let total = build_pivot(&data, &species().count(), None, None).unwrap();
        let by_column = build_pivot(&data, &species().count(), Some(&species()), None).unwrap();
        let by_row = build_pivot(&data, &species().count(), None, Some(&year())).unwrap();
        prop_assert_eq!(Matrix::Scalar(by_column.matrix.total()), total.matrix.clone());
        prop_assert_eq!(Matrix::Scalar(by_row.matrix.total()), total.matrix);
    }

    #[test]
    fn grid_sums_to_scalar(records in records_strategy()) {
        let data = Dataset::loaded(records);
        let total = build_pivot(&data, &species().count(), None, None).unwrap();
        let grid = build_pivot(&data, &species().count(), Some(&species()), Some(&year())).unwrap();
        prop_assert_eq!(grid.matrix.total(), total.matrix.total());
        let (rows, cols) = grid.matrix.dimensions().unwrap();
        prop_assert_eq!(rows, grid.row_headers.len());
        if rows > 0 {
            prop_assert_eq!(cols, grid.column_headers.len());
        }
    }
}
