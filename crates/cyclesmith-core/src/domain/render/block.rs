use crate::domain::render::templates::{INDENT, MC_BLOCK_CLOSE, MC_BLOCK_OPEN};

/// One entry of a generated code section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLine {
    Code(String),
    OpenMc,
    CloseMc,
}

/// An ordered run of statements, possibly with Monte-Carlo guards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<BlockLine>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(BlockLine::Code(line.into()));
    }

    pub fn open_mc(&mut self) {
        self.lines.push(BlockLine::OpenMc);
    }

    pub fn close_mc(&mut self) {
        self.lines.push(BlockLine::CloseMc);
    }

    /// True when the block holds no statements (guards alone don't count).
    pub fn is_empty(&self) -> bool {
        !self.lines.iter().any(|l| matches!(l, BlockLine::Code(_)))
    }

    pub fn lines(&self) -> &[BlockLine] {
        &self.lines
    }

    /// Render with one indentation level, plus one more inside guards.
    pub fn render(&self) -> String {
        let mut depth = 1usize;
        let mut out = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            match line {
                BlockLine::Code(code) => out.push(format!("{}{code}", INDENT.repeat(depth))),
                BlockLine::OpenMc => {
                    out.push(format!("{}{MC_BLOCK_OPEN}", INDENT.repeat(depth)));
                    depth += 1;
                }
                BlockLine::CloseMc => {
                    depth = depth.saturating_sub(1).max(1);
                    out.push(format!("{}{MC_BLOCK_CLOSE}", INDENT.repeat(depth)));
                }
            }
        }
        out.join("\n")
    }
}

/// Indent every non-empty line by one level.
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
