/// Trail of labels shown in the header, one per level below the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumbs {
    parts: Vec<String>,
}

impl Breadcrumbs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.parts.pop()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}
