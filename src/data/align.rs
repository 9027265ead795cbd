use super::model::{AlignedRecord, FeatureSchema, FeatureValue, RawInputRecord};

// ---------------------------------------------------------------------------
// Feature alignment: raw record → one model's schema
// ---------------------------------------------------------------------------

/// Reshape `raw` to exactly the columns of `schema`, filling gaps with `0`.
pub fn align(raw: &RawInputRecord, schema: &FeatureSchema) -> AlignedRecord {
    align_with_default(raw, schema, FeatureValue::ZERO)
}

/// Reshape `raw` to exactly the columns of `schema`.
///
/// * A schema column present in `raw` → value copied as-is (no coercion)
/// * A schema column absent from `raw` → `default`
/// * A `raw` column not in `schema` → dropped without notice
///
/// Missing columns are the normal case: each model was trained on its own
/// feature subset and the form does not know about any of them.
pub fn align_with_default(
    raw: &RawInputRecord,
    schema: &FeatureSchema,
    default: FeatureValue,
) -> AlignedRecord {
    let columns = schema
        .names()
        .iter()
        .map(|name| (name.clone(), raw.get(name).unwrap_or(default)))
        .collect();
    AlignedRecord { columns }
}

/// Counts describing how far a raw record was from a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentGap {
    /// Schema columns that received the default.
    pub filled: usize,
    /// Raw columns the schema does not know.
    pub dropped: usize,
}

pub fn alignment_gap(raw: &RawInputRecord, schema: &FeatureSchema) -> AlignmentGap {
    let filled = schema
        .names()
        .iter()
        .filter(|name| !raw.contains(name))
        .count();
    let dropped = raw.names().filter(|name| !schema.contains(name)).count();
    AlignmentGap { filled, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_record() -> RawInputRecord {
        RawInputRecord::new()
            .with("DR", 4i64)
            .with("Start_Depth", 1.0)
            .with("Team_ID", 2i64)
            .with("Opp_ID", 5i64)
            .with("Rolling_SO_5", 7.0)
            .with("Rolling_BB_5", 1.5)
            .with("Rolling_IP_5", 5.8)
    }

    #[test]
    fn output_has_exactly_schema_columns_in_order() {
        let schema = FeatureSchema::new(["Rolling_IP_5", "Unknown", "DR"]).unwrap();
        let aligned = align(&game_record(), &schema);
        let names: Vec<&str> = aligned.names().collect();
        assert_eq!(names, vec!["Rolling_IP_5", "Unknown", "DR"]);
    }

    #[test]
    fn present_values_are_copied_without_coercion() {
        let schema = FeatureSchema::new(["DR", "Start_Depth"]).unwrap();
        let aligned = align(&game_record(), &schema);
        assert_eq!(aligned.get("DR"), Some(FeatureValue::Integer(4)));
        assert_eq!(aligned.get("Start_Depth"), Some(FeatureValue::Float(1.0)));
    }

    #[test]
    fn absent_values_take_the_default() {
        let schema = FeatureSchema::new(["DR", "Park_Factor"]).unwrap();
        assert_eq!(
            align(&game_record(), &schema).get("Park_Factor"),
            Some(FeatureValue::Integer(0))
        );
        assert_eq!(
            align_with_default(&game_record(), &schema, FeatureValue::Float(-1.0))
                .get("Park_Factor"),
            Some(FeatureValue::Float(-1.0))
        );
    }

    #[test]
    fn realigning_is_idempotent() {
        let schema = FeatureSchema::new(["Opp_ID", "Extra", "Rolling_SO_5"]).unwrap();
        let once = align(&game_record(), &schema);
        let twice = align(&once.to_raw(), &schema);
        assert_eq!(once, twice);
    }

    #[test]
    fn extra_schema_column_is_zero_filled() {
        let schema = FeatureSchema::new([
            "DR",
            "Start_Depth",
            "Team_ID",
            "Opp_ID",
            "Rolling_SO_5",
            "Rolling_BB_5",
            "Rolling_IP_5",
            "Extra_Feature",
        ])
        .unwrap();
        let raw = game_record();
        let aligned = align(&raw, &schema);

        assert_eq!(aligned.len(), 8);
        for name in raw.names() {
            assert_eq!(aligned.get(name), raw.get(name), "column {name}");
        }
        assert_eq!(aligned.get("Extra_Feature"), Some(FeatureValue::Integer(0)));
    }

    #[test]
    fn unknown_pitcher_indicator_is_dropped() {
        let raw = game_record().with("pitcher_id_snellbl01", 1i64);
        let schema = FeatureSchema::new(["DR", "pitcher_id_doejo01"]).unwrap();
        let aligned = align(&raw, &schema);

        assert_eq!(aligned.get("pitcher_id_doejo01"), Some(FeatureValue::Integer(0)));
        assert_eq!(aligned.get("pitcher_id_snellbl01"), None);
        assert_eq!(
            alignment_gap(&raw, &schema),
            AlignmentGap {
                filled: 1,
                dropped: 7
            }
        );
    }
}
