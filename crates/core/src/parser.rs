//! Parser for `go test -bench` output
//!
//! Output format:
//! ```text
//! goos: linux
//! goarch: amd64
//! pkg: github.com/user/repo/package
//! BenchmarkUnpackMetaData-12      35928573                28.1 ns/op
//! Benchmark_Set/sqlite-50b-12        83124             15066 ns/op
//! PASS
//! ok      github.com/user/repo/package     230.051s
//! ```
//!
//! `pkg:` lines open a package; result lines are attributed to the most recent
//! one. Anything else, including results printed before the first `pkg:` line,
//! is ignored.

use crate::data::{Benchmark, ParsedBench};
use crate::error::{Error, Result};
use crate::report::{TestCase, TestSuites};
use regex::Regex;
use std::path::Path;

/// A benchmark result line split into its fields
#[derive(Debug, Clone, PartialEq)]
pub struct ResultLine<'a> {
    pub name: &'a str,
    pub n: u64,
    pub ns_per_op: f64,
    /// ns/op exactly as printed
    pub ns_per_op_text: &'a str,
}

/// Classification of one trimmed line of output
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Package(&'a str),
    Result(ResultLine<'a>),
    Ignored,
}

/// Parser for go benchmark output
pub struct GoBenchParser {
    /// Regex for `pkg: <path>` lines
    package_regex: Regex,
    /// Regex for `<name> <n> <ns> ns/op` lines
    result_regex: Regex,
}

impl GoBenchParser {
    pub fn new() -> Result<Self> {
        let package_regex = Regex::new(r"^pkg: ([0-9A-Za-z_\-/.]+)")?;
        // ASCII classes only; `\d` and `\s` would also accept other scripts
        let result_regex = Regex::new(
            r"^([0-9A-Za-z_\-/.]+)[\t\n\f\r ]+([0-9]+)[\t\n\f\r ]+([0-9]+(?:\.[0-9]+)?) ns/op",
        )?;

        Ok(Self {
            package_regex,
            result_regex,
        })
    }

    /// Classify a single line that has already been trimmed.
    ///
    /// Fails only when a line matches the result pattern but its iteration
    /// count or ns/op cannot be represented.
    pub fn classify<'a>(&self, line: &'a str) -> Result<Line<'a>> {
        if let Some(package) = self.match_package(line) {
            return Ok(Line::Package(package));
        }

        Ok(self.match_result(line)?.map_or(Line::Ignored, Line::Result))
    }

    fn match_package<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.package_regex
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }

    fn match_result<'a>(&self, line: &'a str) -> Result<Option<ResultLine<'a>>> {
        let Some(captures) = self.result_regex.captures(line) else {
            return Ok(None);
        };
        let (Some(name), Some(n), Some(ns_per_op)) =
            (captures.get(1), captures.get(2), captures.get(3))
        else {
            return Ok(None);
        };

        let n = n.as_str().parse::<u64>().map_err(|source| Error::InvalidIterations {
            line: line.to_string(),
            source,
        })?;
        let ns_per_op_text = ns_per_op.as_str();
        let ns_per_op = ns_per_op_text
            .parse::<f64>()
            .map_err(|source| Error::InvalidNsPerOp {
                line: line.to_string(),
                source,
            })?;

        Ok(Some(ResultLine {
            name: name.as_str(),
            n,
            ns_per_op,
            ns_per_op_text,
        }))
    }

    /// Walk the output, calling `visit` with the current package for every
    /// package line (`None`) and every attributed result line (`Some`).
    fn walk<'a>(
        &self,
        output: &'a str,
        mut visit: impl FnMut(&'a str, Option<ResultLine<'a>>),
    ) -> Result<()> {
        let mut current: Option<&'a str> = None;

        for line in output.lines() {
            let line = line.trim();

            if let Some(package) = self.match_package(line) {
                current = Some(package);
                visit(package, None);
                continue;
            }

            // results before the first package line cannot be attributed
            let Some(package) = current else {
                continue;
            };

            if let Some(result) = self.match_result(line)? {
                visit(package, Some(result));
            }
        }

        Ok(())
    }

    /// Parse one run's output into package -> benchmarks
    pub fn parse(&self, output: &str) -> Result<ParsedBench> {
        let mut parsed = ParsedBench::new();

        self.walk(output, |package, result| {
            let benches = parsed.entry(package.to_string()).or_default();
            if let Some(result) = result {
                benches.push(Benchmark::new(result.name, result.n, result.ns_per_op));
            }
        })?;

        Ok(parsed)
    }

    /// Parse one run's output into a flat test report.
    ///
    /// `strip_prefix` is removed from the front of every package name. The
    /// ns/op value is kept as printed.
    pub fn parse_to_report(
        &self,
        output: &str,
        suite_name: &str,
        strip_prefix: &str,
    ) -> Result<TestSuites> {
        let mut report = TestSuites::new(suite_name);

        self.walk(output, |package, result| {
            let Some(result) = result else {
                return;
            };
            let package = package.strip_prefix(strip_prefix).unwrap_or(package);
            report.suite.tests.push(TestCase {
                name: format!("{}/{}", package, result.name),
                time: result.ns_per_op_text.to_string(),
                package: package.to_string(),
                class_name: suite_name.to_string(),
                cycles: result.n,
            });
        })?;

        Ok(report)
    }
}

/// Read benchmark output, replacing bytes that are not valid UTF-8
pub(crate) fn read_output(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse benchmark output from a file
pub fn parse_from_file(path: &Path) -> Result<ParsedBench> {
    let content = read_output(path)?;
    parse_from_string(&content)
}

/// Parse benchmark output from a string
pub fn parse_from_string(output: &str) -> Result<ParsedBench> {
    let parser = GoBenchParser::new()?;
    parser.parse(output)
}

/// Parse benchmark output from a file into a test report
pub fn parse_report_from_file(
    path: &Path,
    suite_name: &str,
    strip_prefix: &str,
) -> Result<TestSuites> {
    let content = read_output(path)?;
    let parser = GoBenchParser::new()?;
    parser.parse_to_report(&content, suite_name, strip_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ONE_PACKAGE: &str = "goos: darwin
goarch: amd64
pkg: github.com/user/repo/package
BenchmarkUnpackMetaData-12      35928573                28.1 ns/op
Benchmark_Set/sqlite-50b-12        83124             15066 ns/op
PASS
ok      github.com/user/repo/package     230.051s";

    #[test]
    fn test_classify_lines() {
        let parser = GoBenchParser::new().unwrap();

        assert_eq!(
            parser.classify("pkg: github.com/user/repo").unwrap(),
            Line::Package("github.com/user/repo")
        );
        assert_eq!(
            parser.classify("BenchmarkFoo-12   35928573   28.1 ns/op").unwrap(),
            Line::Result(ResultLine {
                name: "BenchmarkFoo-12",
                n: 35928573,
                ns_per_op: 28.1,
                ns_per_op_text: "28.1",
            })
        );
        assert_eq!(parser.classify("PASS").unwrap(), Line::Ignored);
        assert_eq!(parser.classify("").unwrap(), Line::Ignored);
        assert_eq!(parser.classify("goos: linux").unwrap(), Line::Ignored);
        assert_eq!(
            parser.classify("ok      github.com/user/repo/package     230.051s").unwrap(),
            Line::Ignored
        );
    }

    #[test]
    fn test_classify_with_memory_columns() {
        let parser = GoBenchParser::new().unwrap();
        let line = "BenchmarkAlloc-8   1000000   1043 ns/op   512 B/op   4 allocs/op";

        match parser.classify(line).unwrap() {
            Line::Result(result) => {
                assert_eq!(result.name, "BenchmarkAlloc-8");
                assert_eq!(result.n, 1000000);
                assert_eq!(result.ns_per_op, 1043.0);
            }
            other => panic!("expected a result line, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_one_package() {
        let parsed = parse_from_string(ONE_PACKAGE).unwrap();

        let mut expected = ParsedBench::new();
        expected.insert(
            "github.com/user/repo/package".to_string(),
            vec![
                Benchmark::new("BenchmarkUnpackMetaData-12", 35928573, 28.1),
                Benchmark::new("Benchmark_Set/sqlite-50b-12", 83124, 15066.0),
            ],
        );
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_json_shape() {
        let parsed = parse_from_string(
            "pkg: github.com/user/repo/package\nBenchmarkFoo-12   35928573   28.1 ns/op\n",
        )
        .unwrap();

        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"github.com/user/repo/package":[{"name":"BenchmarkFoo-12","n":35928573,"ns_per_op":28.1}]}"#
        );
    }

    #[test]
    fn test_parse_multiple_packages_keeps_order() {
        let output = "pkg: a
BenchmarkA1-4   10   1.5 ns/op
BenchmarkA2-4   20   2.5 ns/op
BenchmarkA3-4   30   3.5 ns/op
pkg: b
BenchmarkB1-4   40   4 ns/op
";
        let parsed = parse_from_string(output).unwrap();

        assert_eq!(parsed.len(), 2);
        let names: Vec<&str> = parsed["a"].iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["BenchmarkA1-4", "BenchmarkA2-4", "BenchmarkA3-4"]);
        assert_eq!(parsed["b"], vec![Benchmark::new("BenchmarkB1-4", 40, 4.0)]);
    }

    #[test]
    fn test_result_before_package_is_ignored() {
        let output = "BenchmarkOrphan-8   100   9.9 ns/op
pkg: p
BenchmarkKept-8   200   1.1 ns/op
";
        let parsed = parse_from_string(output).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["p"], vec![Benchmark::new("BenchmarkKept-8", 200, 1.1)]);
    }

    #[test]
    fn test_package_without_results_is_present() {
        let parsed = parse_from_string("pkg: empty\nPASS\nok  empty 0.01s\n").unwrap();

        assert_eq!(parsed.get("empty"), Some(&Vec::new()));
    }

    #[test]
    fn test_repeated_package_line_keeps_results() {
        let output = "pkg: p
BenchmarkOne-8   1   1 ns/op
pkg: p
BenchmarkTwo-8   2   2 ns/op
";
        let parsed = parse_from_string(output).unwrap();

        assert_eq!(parsed["p"].len(), 2);
    }

    #[test]
    fn test_iteration_overflow_aborts_parse() {
        let output = "pkg: p
BenchmarkOk-8   1   1 ns/op
BenchmarkHuge-8   99999999999999999999999   1 ns/op
";
        let err = parse_from_string(output).unwrap_err();

        assert!(matches!(err, Error::InvalidIterations { .. }));
    }

    #[test]
    fn test_overflow_before_package_is_ignored() {
        let output = "BenchmarkHuge-8   99999999999999999999999   1 ns/op\npkg: p\n";

        assert!(parse_from_string(output).is_ok());
    }

    #[test]
    fn test_non_ascii_digits_are_not_results() {
        let output = "pkg: p\nBenchmarkOk-8   5   1 ns/op\nBenchmarkX-8   \u{661}\u{662}   1 ns/op\n";
        let parsed = parse_from_string(output).unwrap();

        assert_eq!(parsed["p"], vec![Benchmark::new("BenchmarkOk-8", 5, 1.0)]);
    }

    #[test]
    fn test_non_ascii_whitespace_is_not_a_separator() {
        let parser = GoBenchParser::new().unwrap();

        assert_eq!(
            parser.classify("BenchmarkX-8\u{2003}10\u{2003}1 ns/op").unwrap(),
            Line::Ignored
        );
    }

    #[test]
    fn test_crlf_and_indentation() {
        let output = "pkg: p\r\n    BenchmarkIndented-2   5   7.25 ns/op\r\n";
        let parsed = parse_from_string(output).unwrap();

        assert_eq!(parsed["p"], vec![Benchmark::new("BenchmarkIndented-2", 5, 7.25)]);
    }

    #[test]
    fn test_parse_to_report() {
        let parser = GoBenchParser::new().unwrap();
        let report = parser
            .parse_to_report(ONE_PACKAGE, "nightly", "github.com/")
            .unwrap();

        assert_eq!(report.suite.name, "nightly");
        assert_eq!(report.suite.tests.len(), 2);

        let first = &report.suite.tests[0];
        assert_eq!(first.name, "user/repo/package/BenchmarkUnpackMetaData-12");
        assert_eq!(first.time, "28.1");
        assert_eq!(first.package, "user/repo/package");
        assert_eq!(first.class_name, "nightly");
        assert_eq!(first.cycles, 35928573);

        // kept as printed, not reformatted from the float
        assert_eq!(report.suite.tests[1].time, "15066");
    }

    #[test]
    fn test_parse_to_report_prefix_not_present() {
        let parser = GoBenchParser::new().unwrap();
        let report = parser
            .parse_to_report("pkg: gitlab.com/x\nBenchmarkY   3   4.0 ns/op\n", "s", "github.com/")
            .unwrap();

        assert_eq!(report.suite.tests[0].name, "gitlab.com/x/BenchmarkY");
        assert_eq!(report.suite.tests[0].time, "4.0");
    }

    #[test]
    fn test_parse_to_report_overflow_aborts() {
        let parser = GoBenchParser::new().unwrap();
        let result = parser.parse_to_report(
            "pkg: p\nBenchmarkHuge   99999999999999999999999   1 ns/op\n",
            "s",
            "",
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bench.txt");
        std::fs::write(&path, ONE_PACKAGE).unwrap();

        let parsed = parse_from_file(&path).unwrap();
        assert_eq!(parsed["github.com/user/repo/package"].len(), 2);

        let invalid_utf8 = dir.path().join("log.txt");
        std::fs::write(
            &invalid_utf8,
            b"pkg: p\nBenchmarkX   10   1.5 ns/op\n    log: \xff\xfe\nPASS\n",
        )
        .unwrap();
        let parsed = parse_from_file(&invalid_utf8).unwrap();
        assert_eq!(parsed["p"], vec![Benchmark::new("BenchmarkX", 10, 1.5)]);

        let missing = parse_from_file(&dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(Error::FileReadError { .. })));
    }
}
