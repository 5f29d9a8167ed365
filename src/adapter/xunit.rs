//! # xUnit Parser
//!
//! xUnit XMLを `TestSuite` のリストに変換する
//!
//! ルート要素は `<testsuite>` 単体か、0件以上の `<testsuite>` を含む
//! `<testsuites>` のどちらか。`<system-out>` などの未知の要素は無視する。

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::domain::entities::test_result::{ItemStatus, TestCase, TestSuite};

#[derive(Debug, Deserialize)]
struct TestSuitesXml {
    #[serde(rename = "testsuite", default)]
    suites: Vec<TestSuiteXml>,
}

#[derive(Debug, Deserialize)]
struct TestSuiteXml {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(default)]
    properties: Option<PropertiesXml>,
    #[serde(rename = "testcase", default)]
    test_cases: Vec<TestCaseXml>,
}

#[derive(Debug, Deserialize)]
struct PropertiesXml {
    #[serde(default)]
    property: Vec<PropertyXml>,
}

#[derive(Debug, Deserialize)]
struct PropertyXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct TestCaseXml {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@classname")]
    class_name: Option<String>,
    #[serde(rename = "@time")]
    time: Option<String>,
    #[serde(default)]
    failure: Vec<FaultXml>,
    #[serde(default)]
    error: Vec<FaultXml>,
    #[serde(default)]
    skipped: Vec<FaultXml>,
}

#[derive(Debug, Deserialize)]
struct FaultXml {
    #[serde(rename = "@message")]
    message: Option<String>,
    #[serde(rename = "$text")]
    text: Option<String>,
}

impl FaultXml {
    fn describe(&self) -> Option<String> {
        self.message
            .as_deref()
            .or(self.text.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

impl TestCaseXml {
    fn into_test_case(self) -> TestCase {
        let faults = self.failure.iter().chain(self.error.iter());

        let (status, failure_message) = if !self.failure.is_empty() || !self.error.is_empty() {
            (
                ItemStatus::Failed,
                faults.filter_map(FaultXml::describe).next(),
            )
        } else if !self.skipped.is_empty() {
            (ItemStatus::Skipped, None)
        } else {
            (ItemStatus::Passed, None)
        };

        TestCase {
            name: self.name,
            class_name: self.class_name,
            duration: self.time.as_deref().and_then(|t| t.trim().parse().ok()),
            status,
            failure_message,
        }
    }
}

impl TestSuiteXml {
    fn into_test_suite(self, suite_name: &str) -> TestSuite {
        TestSuite {
            name: suite_name.to_string(),
            title: self.name,
            properties: self
                .properties
                .map(|p| p.property.into_iter().map(|p| (p.name, p.value)).collect())
                .unwrap_or_default(),
            test_cases: self
                .test_cases
                .into_iter()
                .map(TestCaseXml::into_test_case)
                .collect(),
        }
    }
}

/// ドキュメントのルート要素名を返す
fn root_element(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event().context("Malformed XML")? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::Eof => bail!("XML document has no root element"),
            _ => {}
        }
    }
}

/// xUnit XMLをパースする
///
/// # Arguments
///
/// * `xml` - ドキュメント全体
/// * `suite_name` - スイート名（xUnitファイル名の拡張子なし）
///
/// # Errors
///
/// XMLが壊れている場合、またはルート要素が `testsuite` / `testsuites` 以外の場合
pub fn parse_xunit(xml: &str, suite_name: &str) -> Result<Vec<TestSuite>> {
    let root = root_element(xml)?;

    let suites = match root.as_str() {
        "testsuites" => {
            let wrapper: TestSuitesXml =
                quick_xml::de::from_str(xml).context("Invalid <testsuites> document")?;
            wrapper.suites
        }
        "testsuite" => {
            let suite: TestSuiteXml =
                quick_xml::de::from_str(xml).context("Invalid <testsuite> document")?;
            vec![suite]
        }
        other => bail!("Unexpected xUnit root element <{}>", other),
    };

    Ok(suites
        .into_iter()
        .map(|s| s.into_test_suite(suite_name))
        .collect())
}
