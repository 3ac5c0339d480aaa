use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result, VectorKind};

/// Input/target pairs in training order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub inputs: Vec<Vec<f64>>,
    pub expected: Vec<Vec<f64>>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Parses the line-oriented training file format:
    ///
    /// ```text
    /// t
    /// <input values of example 1>
    /// <expected values of example 1>
    /// ...
    /// ```
    ///
    /// Values are whitespace-separated integers. Vector widths are not
    /// checked here; training reports them as `Error::InputSize`. Anything
    /// after the declared `2t` lines is ignored.
    pub fn parse(text: &str) -> Result<TrainingSet> {
        let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

        let (_, header) = lines
            .next()
            .ok_or_else(|| Error::parse(1, "missing example count"))?;
        let count: usize = header
            .trim()
            .parse()
            .map_err(|_| Error::parse(1, format!("example count {:?} is not an integer", header.trim())))?;

        let mut set = TrainingSet::default();
        for t in 0..count {
            set.inputs.push(next_vector(&mut lines, t, VectorKind::Input)?);
            set.expected.push(next_vector(&mut lines, t, VectorKind::Expected)?);
        }
        Ok(set)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<TrainingSet> {
        TrainingSet::parse(&std::fs::read_to_string(path)?)
    }
}

impl FromStr for TrainingSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TrainingSet::parse(s)
    }
}

fn next_vector<'a, I>(lines: &mut I, example: usize, kind: VectorKind) -> Result<Vec<f64>>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    // Line numbers are 1-based and the header takes line 1.
    let missing_line = 2 * example + match kind {
        VectorKind::Input => 2,
        VectorKind::Expected => 3,
    };
    let (line_no, line) = lines.next().ok_or_else(|| {
        Error::parse(
            missing_line,
            format!("file ends before the {kind} line of example {}", example + 1),
        )
    })?;

    line.split_whitespace()
        .map(|tok| {
            tok.parse::<i64>()
                .map(|v| v as f64)
                .map_err(|_| Error::parse(line_no, format!("{tok:?} is not an integer")))
        })
        .collect()
}
