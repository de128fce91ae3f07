use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A validated `sbatch --array` value, e.g. `1-5`, `1,2,5`, `0-15:4` or `1-100%10`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArraySpec {
    items: Vec<ArrayItem>,
    limit: Option<u32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ArrayItem {
    Index(u32),
    Range { start: u32, end: u32, step: Option<u32> },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid array '{value}': {reason}")]
pub struct ArraySpecError {
    value: String,
    reason: String,
}

impl ArraySpec {
    /// Argument passed to sbatch
    pub fn to_arg(&self) -> String {
        format!("--array={self}")
    }
}

impl FromStr for ArraySpec {
    type Err = ArraySpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| ArraySpecError {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let (list, limit) = match value.split_once('%') {
            Some((list, limit)) => {
                let limit = parse_number(limit).ok_or_else(|| fail("limit after '%' must be a number"))?;
                if limit == 0 {
                    return Err(fail("limit after '%' must be at least 1"));
                }
                (list, Some(limit))
            }
            None => (value, None),
        };

        if list.trim().is_empty() {
            return Err(fail("no task indices given"));
        }

        let mut items = Vec::new();
        for item in list.split(',') {
            items.push(parse_item(item).map_err(|reason| fail(reason))?);
        }

        Ok(ArraySpec { items, limit })
    }
}

fn parse_item(item: &str) -> Result<ArrayItem, &'static str> {
    let (range, step) = match item.split_once(':') {
        Some((range, step)) => {
            let step = parse_number(step).ok_or("step after ':' must be a number")?;
            if step == 0 {
                return Err("step after ':' must be at least 1");
            }
            (range, Some(step))
        }
        None => (item, None),
    };

    match range.split_once('-') {
        Some((start, end)) => {
            let start = parse_number(start).ok_or("range start must be a number")?;
            let end = parse_number(end).ok_or("range end must be a number")?;
            if start > end {
                return Err("range start is larger than range end");
            }
            Ok(ArrayItem::Range { start, end, step })
        }
        None if step.is_some() => Err("a step needs a range, e.g. 1-10:2"),
        None => parse_number(range)
            .map(ArrayItem::Index)
            .ok_or("task indices must be numbers"),
    }
}

fn parse_number(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

impl fmt::Display for ArrayItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArrayItem::Index(i) => write!(f, "{i}"),
            ArrayItem::Range { start, end, step: None } => write!(f, "{start}-{end}"),
            ArrayItem::Range { start, end, step: Some(step) } => write!(f, "{start}-{end}:{step}"),
        }
    }
}

impl fmt::Display for ArraySpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.items.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
        }
        for item in iter {
            write!(f, ",{item}")?;
        }
        if let Some(limit) = self.limit {
            write!(f, "%{limit}")?;
        }
        Ok(())
    }
}
