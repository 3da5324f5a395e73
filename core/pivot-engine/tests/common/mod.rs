//! FILENAME: tests/common/mod.rs
//! Fixtures for pivot-engine integration tests.

#![allow(dead_code)]

use engine::{Dataset, Record, Value};
use pivot_engine::FieldRef;

pub const TABLE: &str = "bioreactor";

pub fn species() -> FieldRef {
    FieldRef::qualified(TABLE, "species")
}

pub fn date() -> FieldRef {
    FieldRef::qualified(TABLE, "date")
}

pub fn reactor() -> FieldRef {
    FieldRef::qualified(TABLE, "reactor")
}

/// Bioreactor samples: (species, date, reactor).
pub struct SampleFixture;

impl SampleFixture {
    pub fn data() -> Vec<(&'static str, &'static str, f64)> {
        vec![
            ("E. coli", "2021-03", 1.0),
            ("S. cerevisiae", "2021-01", 2.0),
            ("E. coli", "2021-01", 1.0),
            ("B. subtilis", "2021-02", 3.0),
            ("E. coli", "2021-02", 2.0),
            ("S. cerevisiae", "2021-03", 2.0),
            ("E. coli", "2021-03", 3.0),
        ]
    }

    pub fn records() -> Vec<Record> {
        Self::data()
            .into_iter()
            .map(|(s, d, r)| {
                Record::from_pairs([
                    (species().property, Value::text(s)),
                    (date().property, Value::text(d)),
                    (reactor().property, Value::Number(r)),
                ])
            })
            .collect()
    }

    pub fn dataset() -> Dataset {
        Dataset::loaded(Self::records())
    }
}
