//! Maps loosely-named sheet columns onto [`BaseRecord`] fields.

use std::collections::HashMap;

use marquee_model::{BaseRecord, MediaKind, non_empty};

/// First non-empty value among the candidate column names.
fn pick(row: &HashMap<String, String>, columns: &[&str]) -> String {
    columns
        .iter()
        .filter_map(|column| row.get(*column))
        .find(|value| !value.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// Builds a record from one sheet row. Rows without a title are skipped.
pub fn record_from_row(
    row: &HashMap<String, String>,
    kind: MediaKind,
) -> Option<BaseRecord> {
    let title = pick(row, &["title", "show", "name"]);
    let mut record = BaseRecord::new(kind, title)
        .ok()?
        .with_year(pick(row, &["year"]));

    record.genre = pick(row, &["genre"]);
    record.status = pick(row, &["status", "watched"]);
    record.subs = pick(row, &["subs"]);
    record.rating = pick(row, &["rating", "imdb"]);
    record.notes = pick(row, &["notes", "comments"]);
    record.service = pick(row, &["service", "platform", "streaming"]);
    record.overview =
        non_empty(Some(pick(row, &["plot", "overview", "description"])));
    record.votes = pick(row, &["votes"]);
    record.rotten_tomatoes = pick(row, &["rotten tomatoes", "rt"]);
    record.poster = non_empty(Some(pick(row, &["poster"])));
    record.backdrop = non_empty(Some(pick(row, &["backdrop"])));

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn falls_back_across_column_aliases() {
        let record = record_from_row(
            &row(&[
                ("show", "The Bear"),
                ("watched", "Watching"),
                ("imdb", "8.6"),
                ("platform", "Hulu"),
                ("rt", "99%"),
                ("description", "Kitchen chaos."),
            ]),
            MediaKind::Series,
        )
        .unwrap();

        assert_eq!(record.title, "The Bear");
        assert_eq!(record.status, "Watching");
        assert_eq!(record.rating, "8.6");
        assert_eq!(record.service, "Hulu");
        assert_eq!(record.rotten_tomatoes, "99%");
        assert_eq!(record.overview.as_deref(), Some("Kitchen chaos."));
        assert_eq!(record.year, None);
        assert_eq!(record.poster, None);
    }

    #[test]
    fn primary_column_wins_over_alias() {
        let record = record_from_row(
            &row(&[("title", "Heat"), ("name", "Other"), ("year", "1995")]),
            MediaKind::Movie,
        )
        .unwrap();
        assert_eq!(record.title, "Heat");
        assert_eq!(record.year.as_deref(), Some("1995"));
    }

    #[test]
    fn untitled_rows_are_dropped() {
        let untitled = row(&[("year", "2020")]);
        assert!(record_from_row(&untitled, MediaKind::Movie).is_none());
    }
}
