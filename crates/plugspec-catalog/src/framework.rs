//! Test framework selection.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A test framework a plugin build can be wired against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    /// The host platform's own test harness.
    Platform,
    /// Harness for testing against other installed plugins.
    Plugin,
    /// Legacy unit framework.
    JUnit4,
    /// Modern unit framework.
    JUnit5,
}

impl TestFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestFramework::Platform => "platform",
            TestFramework::Plugin => "plugin",
            TestFramework::JUnit4 => "junit4",
            TestFramework::JUnit5 => "junit5",
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of test frameworks bound to a build target.
///
/// Backed by an ordered set: insertion order is irrelevant and duplicates
/// collapse, so two bindings with the same members compare and serialize
/// identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestFrameworkBinding {
    frameworks: BTreeSet<TestFramework>,
}

impl TestFrameworkBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, framework: TestFramework) -> bool {
        self.frameworks.insert(framework)
    }

    pub fn remove(&mut self, framework: &TestFramework) -> bool {
        self.frameworks.remove(framework)
    }

    pub fn contains(&self, framework: &TestFramework) -> bool {
        self.frameworks.contains(framework)
    }

    /// Add every framework in `other`.
    pub fn union_with(&mut self, other: &TestFrameworkBinding) {
        self.frameworks.extend(other.frameworks.iter().copied());
    }

    /// Whether every member of `required` is present.
    pub fn covers(&self, required: &TestFrameworkBinding) -> bool {
        self.frameworks.is_superset(&required.frameworks)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestFramework> {
        self.frameworks.iter()
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl FromIterator<TestFramework> for TestFrameworkBinding {
    fn from_iter<I: IntoIterator<Item = TestFramework>>(iter: I) -> Self {
        Self {
            frameworks: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[TestFramework; N]> for TestFrameworkBinding {
    fn from(frameworks: [TestFramework; N]) -> Self {
        frameworks.into_iter().collect()
    }
}

impl fmt::Display for TestFrameworkBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.frameworks.iter().map(|fw| fw.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}
