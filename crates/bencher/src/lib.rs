//! Shared fixtures for the header benchmarks.

/// One benchmark input: a header block plus the line limit to run it with.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
    line_limit: usize,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file, line_limit: 0 }
    }

    pub fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Small, file)
    }

    pub fn large(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Large, file)
    }

    /// Runs the case with a line limit; 0 keeps it unlimited.
    #[must_use]
    pub fn with_line_limit(mut self, line_limit: usize) -> Self {
        self.line_limit = line_limit;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn line_limit(&self) -> usize {
        self.line_limit
    }
}

/// A header block embedded from `resources/`, CRLF line endings included.
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static [u8],
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static [u8]) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static [u8] {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Large,
}
