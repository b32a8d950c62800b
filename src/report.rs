use crate::error::DigipinError;
use crate::index::{encode_digipin, leading_group};
use crate::region::Region;
use crate::sampling::generate_sample_points;
use rayon::prelude::*;
use serde::{Serialize, Serializer};

/// Report format version written to the metadata block.
pub const REPORT_VERSION: &str = "1.0";

/// How strongly a single prefix dominates a region's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Confidence {
    /// Maps a coverage percentage to a confidence label (≥85, ≥75, ≥60, below).
    pub fn from_coverage(coverage: f64) -> Self {
        if coverage >= 85.0 {
            Confidence::VeryHigh
        } else if coverage >= 75.0 {
            Confidence::High
        } else if coverage >= 60.0 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Dominant leading-group statistic for a set of codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixAnalysis {
    /// The most common leading group (earliest seen wins ties)
    pub green: String,
    /// Share of codes carrying `green`, in percent
    #[serde(serialize_with = "round_one_decimal")]
    pub coverage: f64,
    pub confidence: Confidence,
    /// Other leading groups seen more than once, most common first
    pub alternatives: Vec<String>,
    /// Number of codes with the green prefix
    #[serde(skip)]
    pub count: usize,
    /// Number of codes aggregated
    #[serde(skip)]
    pub total: usize,
}

fn round_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10.0).round() / 10.0)
}

/// Groups codes by leading group and reports the dominant one.
///
/// Returns `None` for an empty input.
///
/// # Example
/// ```
/// use digipin_rs::{analyze_codes, Confidence};
///
/// let codes = ["39J-KCC-5TJK", "39J-F3C-28JF", "3C7-59C-KT75"];
/// let analysis = analyze_codes(codes).unwrap();
/// assert_eq!(analysis.green, "39J");
/// assert_eq!(analysis.count, 2);
/// assert_eq!(analysis.confidence, Confidence::Medium);
/// ```
pub fn analyze_codes<I, S>(codes: I) -> Option<PrefixAnalysis>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // First-seen order doubles as the tie-break for the stable sort below.
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut total = 0;

    for code in codes {
        total += 1;
        let prefix = leading_group(code.as_ref());
        match counts.iter_mut().find(|(p, _)| p == prefix) {
            Some((_, n)) => *n += 1,
            None => counts.push((prefix.to_string(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let mut ranked = counts.into_iter();
    let (green, count) = ranked.next()?;

    let coverage = 100.0 * count as f64 / total as f64;
    let alternatives = ranked.filter(|(_, n)| *n > 1).map(|(p, _)| p).collect();

    Some(PrefixAnalysis {
        green,
        coverage,
        confidence: Confidence::from_coverage(coverage),
        alternatives,
        count,
        total,
    })
}

/// Samples a region's bounding box, encodes every sample and aggregates the codes.
///
/// Samples outside the encodable domain are skipped. Returns `None` when no
/// sample could be encoded.
pub fn analyze_region(region: &Region) -> Option<PrefixAnalysis> {
    let codes: Vec<String> = generate_sample_points(&region.bbox)
        .into_iter()
        .filter_map(|p| match encode_digipin(p.lat, p.lon) {
            Ok(code) => Some(code),
            Err(e) => {
                log::debug!("Skipping {:?} sample of '{}': {}", p.label, region.name, e);
                None
            }
        })
        .collect();

    analyze_codes(&codes)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub version: String,
    pub total_cities: usize,
}

/// Dominant-prefix results for a set of regions, keyed by region name.
///
/// Cities keep the order of the input regions and serialize as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixReport {
    pub metadata: ReportMetadata,
    #[serde(serialize_with = "as_ordered_map")]
    pub cities: Vec<(String, PrefixAnalysis)>,
}

fn as_ordered_map<S: Serializer>(
    cities: &[(String, PrefixAnalysis)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(cities.iter().map(|(name, analysis)| (name, analysis)))
}

impl PrefixReport {
    /// Analyses every region in parallel. Regions with no encodable sample are left out.
    pub fn build(regions: &[Region]) -> Self {
        let results: Vec<(String, PrefixAnalysis)> = regions
            .par_iter()
            .filter_map(|region| match analyze_region(region) {
                Some(analysis) => Some((region.name.clone(), analysis)),
                None => {
                    log::warn!("Region '{}' has no encodable sample points", region.name);
                    None
                }
            })
            .collect();

        for (name, analysis) in &results {
            log::info!(
                "Processed {}: green prefix {} ({:.1}%)",
                name,
                analysis.green,
                analysis.coverage
            );
        }

        // A repeated name replaces the earlier result in its original slot
        let mut cities: Vec<(String, PrefixAnalysis)> = Vec::with_capacity(results.len());
        for (name, analysis) in results {
            match cities.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = analysis,
                None => cities.push((name, analysis)),
            }
        }

        Self {
            metadata: ReportMetadata {
                version: REPORT_VERSION.to_string(),
                total_cities: cities.len(),
            },
            cities,
        }
    }

    /// Result for the region called `name`, if it had any encodable sample.
    pub fn city(&self, name: &str) -> Option<&PrefixAnalysis> {
        self.cities
            .iter()
            .find(|(city, _)| city == name)
            .map(|(_, analysis)| analysis)
    }

    pub fn to_json_string(&self) -> Result<String, DigipinError> {
        serde_json::to_string_pretty(self).map_err(|e| DigipinError::JsonError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::default_regions;
    use crate::sampling::{BoundingBox, SAMPLE_COUNT};

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(Confidence::from_coverage(100.0), Confidence::VeryHigh);
        assert_eq!(Confidence::from_coverage(85.0), Confidence::VeryHigh);
        assert_eq!(Confidence::from_coverage(84.9), Confidence::High);
        assert_eq!(Confidence::from_coverage(75.0), Confidence::High);
        assert_eq!(Confidence::from_coverage(60.0), Confidence::Medium);
        assert_eq!(Confidence::from_coverage(59.9), Confidence::Low);
    }

    #[test]
    fn test_analyze_codes_empty() {
        assert!(analyze_codes(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_analyze_codes_tie_goes_to_first_seen() {
        let analysis = analyze_codes(["425-AAA", "422-BBB", "422-CCC", "425-DDD"]).unwrap();
        assert_eq!(analysis.green, "425");
        assert_eq!(analysis.alternatives, vec!["422".to_string()]);
        assert_eq!(analysis.coverage, 50.0);
    }

    #[test]
    fn test_analyze_codes_alternatives_need_repeats() {
        let analysis = analyze_codes(["39J", "39J", "39J", "3C7", "3C7", "3C8"]).unwrap();
        assert_eq!(analysis.green, "39J");
        assert_eq!(analysis.alternatives, vec!["3C7".to_string()]);
        assert_eq!(analysis.total, 6);
    }

    #[test]
    fn test_analyze_region_delhi() {
        let delhi = Region::new("Delhi", BoundingBox::new(28.4, 76.8, 28.9, 77.3));
        let analysis = analyze_region(&delhi).unwrap();

        assert_eq!(analysis.green, "39J");
        assert_eq!(analysis.count, 7);
        assert_eq!(analysis.total, SAMPLE_COUNT);
        assert_eq!(analysis.coverage, 100.0 * 7.0 / 11.0);
        assert_eq!(analysis.confidence, Confidence::Medium);
        assert_eq!(analysis.alternatives, vec!["3C7".to_string()]);
    }

    #[test]
    fn test_analyze_region_hyderabad_low_confidence() {
        let regions = default_regions();
        let analysis = analyze_region(&regions[0]).unwrap();

        assert_eq!(analysis.green, "422");
        assert_eq!(analysis.count, 6);
        assert_eq!(analysis.confidence, Confidence::Low);
        assert_eq!(analysis.alternatives, vec!["425".to_string(), "427".to_string()]);
    }

    #[test]
    fn test_analyze_region_partially_outside_domain() {
        // Straddles the northern domain edge: only the southern samples encode
        let region = Region::new("Edge", BoundingBox::new(38.0, 70.0, 39.0, 71.0));
        let analysis = analyze_region(&region).unwrap();
        assert!(analysis.total < SAMPLE_COUNT);
        assert_eq!(analysis.coverage, 100.0 * analysis.count as f64 / analysis.total as f64);
    }

    #[test]
    fn test_analyze_region_outside_domain() {
        let london = Region::new("London", BoundingBox::new(51.3, -0.5, 51.7, 0.3));
        assert!(analyze_region(&london).is_none());
    }

    #[test]
    fn test_build_report() {
        let mut regions = default_regions();
        regions.push(Region::new("London", BoundingBox::new(51.3, -0.5, 51.7, 0.3)));

        let report = PrefixReport::build(&regions);
        assert_eq!(report.metadata.version, REPORT_VERSION);
        assert_eq!(report.metadata.total_cities, 5);
        assert!(report.city("London").is_none());
        assert_eq!(report.city("Mumbai").map(|a| a.green.as_str()), Some("4FK"));
        assert_eq!(report.city("Bangalore").map(|a| a.green.as_str()), Some("4P3"));
        assert_eq!(report.city("Chennai").map(|a| a.green.as_str()), Some("4T3"));
    }

    #[test]
    fn test_report_keeps_region_order() -> Result<(), DigipinError> {
        let report = PrefixReport::build(&default_regions());
        let names: Vec<&str> = report.cities.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Hyderabad", "Delhi", "Mumbai", "Bangalore", "Chennai"]);

        let json = report.to_json_string()?;
        let positions: Vec<usize> = names
            .iter()
            .filter_map(|name| json.find(&format!("\"{}\"", name)))
            .collect();
        assert_eq!(positions.len(), 5);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }

    #[test]
    fn test_report_repeated_region_name_keeps_first_slot() {
        let regions = vec![
            Region::new("Delhi", BoundingBox::new(28.4, 76.8, 28.9, 77.3)),
            Region::new("Mumbai", BoundingBox::new(18.8, 72.7, 19.3, 73.0)),
            Region::new("Delhi", BoundingBox::new(12.8, 77.4, 13.1, 77.8)),
        ];
        let report = PrefixReport::build(&regions);
        assert_eq!(report.metadata.total_cities, 2);
        assert_eq!(report.cities[0].0, "Delhi");
        assert_eq!(report.cities[0].1.green, "4P3");
        assert_eq!(report.cities[1].0, "Mumbai");
    }

    #[test]
    fn test_report_json_shape() -> Result<(), DigipinError> {
        let regions = vec![Region::new("Delhi", BoundingBox::new(28.4, 76.8, 28.9, 77.3))];
        let report = PrefixReport::build(&regions);
        let value: serde_json::Value = serde_json::from_str(&report.to_json_string()?)
            .map_err(|e| DigipinError::JsonError(e.to_string()))?;

        assert_eq!(value["metadata"]["version"], "1.0");
        assert_eq!(value["metadata"]["total_cities"], 1);
        let delhi = &value["cities"]["Delhi"];
        assert_eq!(delhi["green"], "39J");
        assert_eq!(delhi["coverage"], 63.6);
        assert_eq!(delhi["confidence"], "MEDIUM");
        assert_eq!(delhi["alternatives"][0], "3C7");
        assert!(delhi.get("count").is_none());
        Ok(())
    }
}
