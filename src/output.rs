use colored::Colorize;

/// How a report line should be emphasised on a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Emphasis,
    Plain,
    Warning,
    Link,
    Blank,
}

/// A single line of a package report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}

impl ReportLine {
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Heading, text)
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Emphasis, text)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Plain, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Warning, text)
    }

    pub fn link(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Link, text)
    }

    pub fn blank() -> Self {
        Self::new(LineStyle::Blank, "")
    }
}

/// Receives finished reports, one call per package.
pub trait OutputSink {
    fn emit(&mut self, package: &str, lines: &[ReportLine]);
}

/// Writes reports to stdout with terminal styling.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn render(line: &ReportLine) -> String {
        match line.style {
            LineStyle::Heading => format!(" {}", line.text.yellow().bold()),
            LineStyle::Emphasis => format!(" {}", line.text.bold()),
            LineStyle::Plain => format!(" {}", line.text),
            LineStyle::Warning => format!(" {}", line.text.yellow().bold()),
            LineStyle::Link => format!(" {}", line.text.cyan().underline()),
            LineStyle::Blank => String::new(),
        }
    }
}

impl OutputSink for TerminalSink {
    fn emit(&mut self, _package: &str, lines: &[ReportLine]) {
        println!();
        for line in lines {
            println!("{}", Self::render(line));
        }
    }
}

/// Collects reports in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BufferSink {
    pub reports: Vec<(String, Vec<ReportLine>)>,
}

#[cfg(test)]
impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every line emitted for a package, in order.
    pub fn texts(&self, package: &str) -> Vec<String> {
        self.reports
            .iter()
            .filter(|(name, _)| name == package)
            .flat_map(|(_, lines)| lines.iter().map(|l| l.text.clone()))
            .collect()
    }
}

#[cfg(test)]
impl OutputSink for BufferSink {
    fn emit(&mut self, package: &str, lines: &[ReportLine]) {
        self.reports.push((package.to_string(), lines.to_vec()));
    }
}
