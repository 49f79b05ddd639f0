//! Test-report (JUnit-style XML) representation of a benchmark run

use crate::error::{Error, Result};
use serde::Serialize;

/// `<testsuites>` root element
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename = "testsuites")]
pub struct TestSuites {
    #[serde(rename = "testsuite")]
    pub suite: TestSuite,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestSuite {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "testcase")]
    pub tests: Vec<TestCase>,
}

/// One benchmark result rendered as a test case
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestCase {
    /// `<package>/<benchmark>`
    #[serde(rename = "@name")]
    pub name: String,
    /// ns/op as printed by the benchmark tool
    #[serde(rename = "@time")]
    pub time: String,
    #[serde(rename = "@package")]
    pub package: String,
    /// Always the suite name
    #[serde(rename = "@classname")]
    pub class_name: String,
    /// Iteration count
    #[serde(rename = "@cycles")]
    pub cycles: u64,
}

impl TestSuites {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite: TestSuite {
                name: suite_name.to_string(),
                tests: Vec::new(),
            },
        }
    }

    /// Render as indented XML
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut xml);
        serializer.indent(' ', 4);
        self.serialize(serializer)
            .map_err(|e| Error::XmlError(e.to_string()))?;
        Ok(xml)
    }
}
