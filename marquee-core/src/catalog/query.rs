use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use marquee_model::{MediaKind, MergedRecord};

use super::Catalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Sheet order.
    #[default]
    Default,
    /// Sheet rating, highest first.
    Rating,
    YearDesc,
    YearAsc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(SortOrder::Default),
            "rating" => Ok(SortOrder::Rating),
            "year-desc" => Ok(SortOrder::YearDesc),
            "year-asc" => Ok(SortOrder::YearAsc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Filter and sort settings for one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the genre column.
    pub genre: Option<String>,
    /// Case-insensitive exact status.
    pub status: Option<String>,
    /// Case-insensitive exact service.
    pub service: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn matches(&self, item: &MergedRecord) -> bool {
        let record = &item.record;
        contains_ci(&record.genre, self.genre.as_deref())
            && equals_ci(&record.status, self.status.as_deref())
            && equals_ci(&record.service, self.service.as_deref())
            && contains_ci(&record.title, self.search.as_deref())
    }

    /// Filtered, stably sorted view over `records`.
    pub fn apply<'a>(
        &self,
        records: &'a [MergedRecord],
    ) -> Vec<&'a MergedRecord> {
        let mut selected: Vec<&MergedRecord> =
            records.iter().filter(|r| self.matches(r)).collect();

        match self.sort {
            SortOrder::Default => {}
            SortOrder::Rating => selected.sort_by(|a, b| {
                leading_float(&b.record.rating)
                    .partial_cmp(&leading_float(&a.record.rating))
                    .unwrap_or(Ordering::Equal)
            }),
            SortOrder::YearDesc => {
                selected.sort_by_key(|r| std::cmp::Reverse(year_of(r)))
            }
            SortOrder::YearAsc => selected.sort_by_key(|r| year_of(r)),
        }

        selected
    }
}

/// Distinct values offered as filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub genres: Vec<String>,
    pub statuses: Vec<String>,
    pub services: Vec<String>,
}

impl Facets {
    pub fn collect(records: &[MergedRecord]) -> Self {
        let genres: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.record.genre.split(','))
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        let statuses: BTreeSet<String> = records
            .iter()
            .map(|r| r.record.status.clone())
            .filter(|s| !s.is_empty())
            .collect();
        let services: BTreeSet<String> = records
            .iter()
            .map(|r| r.record.service.clone())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            genres: genres.into_iter().collect(),
            statuses: statuses.into_iter().collect(),
            services: services.into_iter().collect(),
        }
    }
}

impl Catalog {
    pub fn query(
        &self,
        kind: MediaKind,
        query: &CatalogQuery,
    ) -> Vec<&MergedRecord> {
        query.apply(self.records(kind))
    }

    pub fn facets(&self, kind: MediaKind) -> Facets {
        Facets::collect(self.records(kind))
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle.filter(|n| !n.is_empty()) {
        Some(needle) => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        None => true,
    }
}

fn equals_ci(value: &str, expected: Option<&str>) -> bool {
    match expected.filter(|e| !e.is_empty()) {
        Some(expected) => value.to_lowercase() == expected.to_lowercase(),
        None => true,
    }
}

/// Leading numeric prefix of a sheet cell ("8.1/10" -> 8.1); 0 when none.
fn leading_float(raw: &str) -> f64 {
    let raw = raw.trim();
    let end = raw
        .char_indices()
        .find(|(i, c)| {
            !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-'))
        })
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse().unwrap_or(0.0)
}

fn year_of(record: &MergedRecord) -> i64 {
    record
        .record
        .year
        .as_deref()
        .map(|y| leading_float(y) as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::BaseRecord;

    fn movie(
        title: &str,
        year: &str,
        rating: &str,
        genre: &str,
        status: &str,
    ) -> MergedRecord {
        let mut base = BaseRecord::new(MediaKind::Movie, title)
            .unwrap()
            .with_year(year);
        base.rating = rating.into();
        base.genre = genre.into();
        base.status = status.into();
        base.service = "Netflix".into();
        MergedRecord::from(base)
    }

    fn titles(records: &[&MergedRecord]) -> Vec<String> {
        records.iter().map(|r| r.record.title.clone()).collect()
    }

    fn sample() -> Vec<MergedRecord> {
        vec![
            movie("Heat", "1995", "8.3", "Crime, Thriller", "Watched"),
            movie("Alien", "1979", "8.5", "Horror, Sci-Fi", "Want to watch"),
            movie("Dune", "2021", "", "Sci-Fi", "Watched"),
            movie("Tenet", "", "7.3", "Sci-Fi", "watched"),
        ]
    }

    #[test]
    fn filters_combine() {
        let records = sample();
        let query = CatalogQuery {
            genre: Some("sci".into()),
            status: Some("WATCHED".into()),
            ..Default::default()
        };
        assert_eq!(titles(&query.apply(&records)), vec!["Dune", "Tenet"]);

        let search = CatalogQuery {
            search: Some("EA".into()),
            service: Some("netflix".into()),
            ..Default::default()
        };
        assert_eq!(titles(&search.apply(&records)), vec!["Heat"]);
    }

    #[test]
    fn sorts_are_stable_and_treat_blank_as_zero() {
        let records = sample();
        let by = |sort| {
            titles(&CatalogQuery { sort, ..Default::default() }.apply(&records))
        };

        assert_eq!(
            by(SortOrder::Rating),
            vec!["Alien", "Heat", "Tenet", "Dune"]
        );
        assert_eq!(
            by(SortOrder::YearDesc),
            vec!["Dune", "Heat", "Alien", "Tenet"]
        );
        assert_eq!(
            by(SortOrder::YearAsc),
            vec!["Tenet", "Alien", "Heat", "Dune"]
        );
        assert_eq!(
            by(SortOrder::Default),
            vec!["Heat", "Alien", "Dune", "Tenet"]
        );
    }

    #[test]
    fn facets_are_distinct_and_sorted() {
        let facets = Facets::collect(&sample());
        assert_eq!(
            facets.genres,
            vec!["Crime", "Horror", "Sci-Fi", "Thriller"]
        );
        assert_eq!(
            facets.statuses,
            vec!["Want to watch", "Watched", "watched"]
        );
        assert_eq!(facets.services, vec!["Netflix"]);
    }

    #[test]
    fn parses_sort_names() {
        assert_eq!("year-desc".parse::<SortOrder>(), Ok(SortOrder::YearDesc));
        assert!("random".parse::<SortOrder>().is_err());
    }
}
