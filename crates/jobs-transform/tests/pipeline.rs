//! End-to-end pipeline tests against in-memory sources.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use jobs_ingest::{IngestError, SourceFetcher};
use jobs_model::{PipelineConfig, SourceConfig};
use jobs_transform::{JobPipeline, PipelineError};

const CURRENT: &str = "\
Job ID,Job Title,Organization,Location,Salary,Closing Date
\"40,123\",Policy Analyst,Ministry of Health,Toronto,\"$80,000 - $100,000 Per Year\",\"Friday, June 28, 2024 11:59 pm EDT\"
40124,Data Clerk,Ministry of Finance,Oshawa,$30.00 Per Hour,\"Monday, July 1, 2024 11:59 pm EDT\"
";

const RECENT: &str = "\
Unnamed: 0,Job ID,Job Title,Organization,Location,Salary,Closing Date
0,40124,Data Clerk (old),Ministry of Finance,Oshawa,$29.00 Per Hour,\"Monday, July 1, 2024 11:59 pm EDT\"
1,39001,Engineer,Ministry of Transportation,Kingston,\"$5,000 Per Month\",\"Friday, May 31, 2024 11:59 pm EDT\"
";

const HISTORY: &str = "\
Job ID,Job Title,Organization,Location,Salary,Closing Date
40123.0,Policy Analyst (old),Ministry of Health,Toronto,\"$70,000 - $90,000 Per Year\",\"Friday, June 28, 2024 11:59 pm EDT\"
38000,Archivist,Archives,Toronto,negotiable,until filled
";

const EXTENDED: &str = "\
Job ID,Division,Address,Job Code
40123,Health Policy,\"777 Bay St, Toronto\",HP-1
";

struct StaticFetcher {
    files: HashMap<String, Vec<u8>>,
    calls: Arc<AtomicUsize>,
}

impl StaticFetcher {
    fn new(files: &[(&str, &str)]) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = Self {
            files: files
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.as_bytes().to_vec()))
                .collect(),
            calls: Arc::clone(&calls),
        };
        (fetcher, calls)
    }
}

impl SourceFetcher for StaticFetcher {
    fn fetch(&self, location: &str) -> jobs_ingest::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| IngestError::unavailable(location, "HTTP 404"))
    }
}

fn config() -> PipelineConfig {
    PipelineConfig::new(vec![
        SourceConfig::new("current", "mem://current.csv"),
        SourceConfig::new("recent", "mem://recent.csv"),
        SourceConfig::new("history", "mem://history.csv"),
    ])
}

fn june_20() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

fn all_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("mem://current.csv", CURRENT),
        ("mem://recent.csv", RECENT),
        ("mem://history.csv", HISTORY),
        ("mem://extended.csv", EXTENDED),
    ]
}

#[test]
fn three_sources_merge_normalize_and_sort() {
    let (fetcher, _) = StaticFetcher::new(&all_files());
    let pipeline = JobPipeline::new(config().with_upcoming_only(false), Box::new(fetcher));
    let outcome = pipeline.run(june_20()).unwrap();
    let table = outcome.table;

    // Sorted by closing date, undated last.
    assert_eq!(table.job_ids(), vec!["39001", "40123", "40124", "38000"]);

    let analyst = &table.records()[1];
    assert_eq!(analyst.job_title, "Policy Analyst");
    assert_eq!(analyst.salary_min, Some(80_000.0));
    assert_eq!(analyst.salary_max, Some(100_000.0));

    let clerk = &table.records()[2];
    assert_eq!(clerk.job_title, "Data Clerk");
    assert_eq!(clerk.salary_min, Some(30.0 * 36.25 * 52.0));

    let engineer = &table.records()[0];
    assert_eq!(engineer.salary_min, Some(60_000.0));
    assert_eq!(engineer.closing_date, NaiveDate::from_ymd_opt(2024, 5, 31));

    let archivist = &table.records()[3];
    assert_eq!(archivist.salary_min, None);
    assert_eq!(archivist.closing_date, None);

    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.report.rows, 4);
    assert_eq!(outcome.report.salary_unparsed, 1);
    assert_eq!(outcome.report.date_unparsed, 1);
}

#[test]
fn upcoming_only_drops_closed_postings_but_keeps_undated() {
    let (fetcher, _) = StaticFetcher::new(&all_files());
    let pipeline = JobPipeline::new(config(), Box::new(fetcher));
    let outcome = pipeline.run(june_20()).unwrap();

    assert_eq!(outcome.closed_removed, 1);
    assert_eq!(outcome.table.job_ids(), vec!["40123", "40124", "38000"]);
}

#[test]
fn extended_source_enriches_matching_rows() {
    let (fetcher, _) = StaticFetcher::new(&all_files());
    let config = config()
        .with_extended(SourceConfig::new("extended", "mem://extended.csv"))
        .with_link_template("https://jobs.example/{job_id}");
    let pipeline = JobPipeline::new(config, Box::new(fetcher));
    let table = pipeline.run(june_20()).unwrap().table;

    let analyst = table.iter().find(|r| r.job_id == "40123").unwrap();
    assert_eq!(analyst.division.as_deref(), Some("Health Policy"));
    assert_eq!(analyst.address.as_deref(), Some("777 Bay St, Toronto"));
    assert_eq!(analyst.link.as_deref(), Some("https://jobs.example/40123"));

    let clerk = table.iter().find(|r| r.job_id == "40124").unwrap();
    assert_eq!(clerk.division, None);
    assert!(table.has_extended_fields());
}

#[test]
fn optional_source_failure_is_a_warning() {
    let (fetcher, _) = StaticFetcher::new(&[("mem://current.csv", CURRENT)]);
    let config = PipelineConfig::new(vec![
        SourceConfig::new("current", "mem://current.csv"),
        SourceConfig::new("history", "mem://history.csv").optional(),
    ]);
    let pipeline = JobPipeline::new(config, Box::new(fetcher));
    let outcome = pipeline.run(june_20()).unwrap();

    assert_eq!(outcome.table.len(), 2);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("history"));
}

#[test]
fn required_source_failure_halts() {
    let (fetcher, _) = StaticFetcher::new(&[("mem://current.csv", CURRENT)]);
    let pipeline = JobPipeline::new(config(), Box::new(fetcher));
    let err = pipeline.run(june_20()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Ingest(IngestError::SourceUnavailable { .. })
    ));
}

#[test]
fn all_optional_sources_missing_is_no_sources() {
    let (fetcher, _) = StaticFetcher::new(&[]);
    let config = PipelineConfig::new(vec![
        SourceConfig::new("current", "mem://current.csv").optional(),
    ]);
    let pipeline = JobPipeline::new(config, Box::new(fetcher));
    assert!(matches!(pipeline.run(june_20()), Err(PipelineError::NoSources)));

    let (fetcher, _) = StaticFetcher::new(&[]);
    let pipeline = JobPipeline::new(PipelineConfig::default(), Box::new(fetcher));
    assert!(matches!(pipeline.run(june_20()), Err(PipelineError::NoSources)));
}

#[test]
fn schema_mismatch_is_fatal_even_for_optional_sources() {
    let (fetcher, _) = StaticFetcher::new(&[
        ("mem://current.csv", CURRENT),
        ("mem://broken.csv", "Job ID,Job Title\n1,Analyst\n"),
    ]);
    let config = PipelineConfig::new(vec![
        SourceConfig::new("current", "mem://current.csv"),
        SourceConfig::new("broken", "mem://broken.csv").optional(),
    ]);
    let pipeline = JobPipeline::new(config, Box::new(fetcher));
    let err = pipeline.run(june_20()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Ingest(IngestError::SchemaMismatch { .. })
    ));
}

#[test]
fn load_is_cached_until_refresh() {
    let (fetcher, calls) = StaticFetcher::new(&all_files());
    let pipeline = JobPipeline::new(config(), Box::new(fetcher));

    let first = pipeline.load(false).unwrap();
    let second = pipeline.load(false).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let refreshed = pipeline.load(true).unwrap();
    assert!(!Arc::ptr_eq(&first, &refreshed));
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}
