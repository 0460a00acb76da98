//! Reduction of per-location time series to an extreme and its timestep.
//!
//! When several timesteps share the extreme value the latest one wins: the
//! extreme is computed first, then the series is searched in reverse for it.
//! The same rule picks the winning element when a location has one series
//! per spatial element.

use crest_io::DataItem;

/// Aggregation applied to a time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aggregation {
    #[default]
    Max,
    Min,
}

impl Aggregation {
    /// Aggregate the non-NaN values of `series`. `None` if there are none.
    pub fn aggregate(self, series: &[f64]) -> Option<f64> {
        series
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(|a, b| match self {
                Self::Max => a.max(b),
                Self::Min => a.min(b),
            })
    }
}

/// An extreme value and the timestep index where it last occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extreme {
    pub value: f64,
    pub timestep: usize,
}

/// Outcome of reducing a location's time series.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    /// Aggregated value with its timestep.
    Extreme(Extreme),
    /// No aggregation requested: the raw series, one per element.
    Series(Vec<Vec<f64>>),
}

impl Reduction {
    /// The extreme, if this reduction carries one.
    pub fn extreme(&self) -> Option<Extreme> {
        match self {
            Self::Extreme(e) => Some(*e),
            Self::Series(_) => None,
        }
    }
}

/// Reduce one series.
///
/// With `aggregation = None` the series is passed through unchanged and no
/// timestep is computed. Returns `None` when an aggregation is requested but
/// the series has no finite values.
pub fn reduce(series: &[f64], aggregation: Option<Aggregation>) -> Option<Reduction> {
    match aggregation {
        None => Some(Reduction::Series(vec![series.to_vec()])),
        Some(agg) => extreme_of(series, agg).map(Reduction::Extreme),
    }
}

/// Reduce a location exposed as several element series.
///
/// Each element is reduced on its own, then the element extremes are
/// aggregated with the same latest-wins rule; the reported timestep is the
/// winning element's.
pub fn reduce_elements(elements: &[&[f64]], aggregation: Option<Aggregation>) -> Option<Reduction> {
    let Some(agg) = aggregation else {
        return Some(Reduction::Series(
            elements.iter().map(|s| s.to_vec()).collect(),
        ));
    };

    let extremes: Vec<Extreme> = elements
        .iter()
        .filter_map(|series| extreme_of(series, agg))
        .collect();
    let values: Vec<f64> = extremes.iter().map(|e| e.value).collect();
    let winner = extreme_of(&values, agg)?;
    Some(Reduction::Extreme(extremes[winner.timestep]))
}

/// First data item whose quantity matches one of `spellings`.
pub fn first_water_level_item<'a>(
    items: &'a [DataItem],
    spellings: &[String],
) -> Option<&'a DataItem> {
    items
        .iter()
        .find(|item| spellings.iter().any(|s| *s == item.quantity))
}

fn extreme_of(series: &[f64], agg: Aggregation) -> Option<Extreme> {
    let value = agg.aggregate(series)?;
    let timestep = series.iter().rposition(|&v| v == value)?;
    Some(Extreme { value, timestep })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extreme(series: &[f64]) -> Extreme {
        reduce(series, Some(Aggregation::Max))
            .and_then(|r| r.extreme())
            .expect("series has an extreme")
    }

    #[test]
    fn repeated_maximum_takes_latest_index() {
        let e = extreme(&[1.0, 3.0, 3.0, 2.0]);
        assert_eq!(e.value, 3.0);
        assert_eq!(e.timestep, 2);

        let e = extreme(&[2.0, 2.0, 4.0, 4.0]);
        assert_eq!(e.value, 4.0);
        assert_eq!(e.timestep, 3);
    }

    #[test]
    fn unique_maximum_index() {
        let e = extreme(&[5.0, 1.0, 0.0]);
        assert_eq!(e.timestep, 0);
    }

    #[test]
    fn minimum_aggregation_latest_tie() {
        let r = reduce(&[1.0, 0.5, 2.0, 0.5], Some(Aggregation::Min)).unwrap();
        assert_eq!(
            r.extreme(),
            Some(Extreme {
                value: 0.5,
                timestep: 3
            })
        );
    }

    #[test]
    fn nan_values_are_ignored() {
        let e = extreme(&[f64::NAN, 2.0, f64::NAN]);
        assert_eq!(e.value, 2.0);
        assert_eq!(e.timestep, 1);
        assert!(reduce(&[f64::NAN], Some(Aggregation::Max)).is_none());
    }

    #[test]
    fn empty_series_has_no_extreme() {
        assert!(reduce(&[], Some(Aggregation::Max)).is_none());
    }

    #[test]
    fn pass_through_without_aggregation() {
        let r = reduce(&[1.0, 2.0], None).unwrap();
        assert_eq!(r, Reduction::Series(vec![vec![1.0, 2.0]]));
        assert!(r.extreme().is_none());
    }

    #[test]
    fn elements_latest_element_wins_tie() {
        let a = [1.0, 5.0, 2.0];
        let b = [5.0, 0.0, 0.0];
        let c = [4.0, 4.0, 4.0];
        let r = reduce_elements(&[&a, &b, &c], Some(Aggregation::Max)).unwrap();
        // Both a and b peak at 5.0; b is the later element, so b's timestep.
        assert_eq!(
            r.extreme(),
            Some(Extreme {
                value: 5.0,
                timestep: 0
            })
        );
    }

    #[test]
    fn elements_skip_empty_series() {
        let a: [f64; 0] = [];
        let b = [1.0, 2.0];
        let r = reduce_elements(&[&a, &b], Some(Aggregation::Max)).unwrap();
        assert_eq!(r.extreme().unwrap().timestep, 1);
        assert!(reduce_elements(&[&a], Some(Aggregation::Max)).is_none());
    }

    #[test]
    fn elements_pass_through() {
        let a = [1.0];
        let b = [2.0];
        let r = reduce_elements(&[&a, &b], None).unwrap();
        assert_eq!(r, Reduction::Series(vec![vec![1.0], vec![2.0]]));
    }

    #[test]
    fn only_first_matching_item_used() {
        let items = vec![
            DataItem {
                quantity: "Discharge".into(),
                series: vec![vec![9.0]],
            },
            DataItem {
                quantity: "Water Level".into(),
                series: vec![vec![1.0]],
            },
            DataItem {
                quantity: "WaterLevel".into(),
                series: vec![vec![2.0]],
            },
        ];
        let spellings = vec!["WaterLevel".to_string(), "Water Level".to_string()];
        let item = first_water_level_item(&items, &spellings).unwrap();
        assert_eq!(item.series[0], vec![1.0]);

        assert!(first_water_level_item(&items[..1], &spellings).is_none());
    }
}
