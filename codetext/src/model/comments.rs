//! Splices generated comments into node lines before assembly.
//!
//! Root nodes get a "don't edit" header. A line matching the language's
//! function pattern gets the prose that preceded its chunk as a comment,
//! starting from the first prose line that begins with the function name.

use regex::Regex;

use crate::config::{Config, Language, Placement};
use crate::errors::Result;

use super::node::{Line, NodeId};
use super::tree::NodeTree;

/// Text of the header comment placed on top of every generated file.
pub fn header_text(source_name: &str) -> String {
    format!(
        "automatically generated, DON'T EDIT. please edit {} from where this file stems.",
        source_name
    )
}

/// Inserts header and function comments into a node. Runs at most once per node.
pub fn insert_comments(
    tree: &mut NodeTree,
    id: NodeId,
    language: Option<&Language>,
    config: &Config,
    source_name: &str,
) -> Result<()> {
    let node = tree.node_mut(id);
    if node.commented {
        return Ok(());
    }
    node.commented = true;

    let Some(language) = language else {
        return Ok(());
    };
    let function = if config.function_comments {
        language.function_regex()?
    } else {
        None
    };

    let lines = std::mem::take(&mut node.lines);
    let mut out = Vec::with_capacity(lines.len() + 1);

    if node.is_root() && config.header && !lines.is_empty() {
        if let Some(header) = language.comment.wrap(&header_text(source_name)) {
            out.push(Line::synthetic(header));
        }
    }

    let mut prose: &[Line] = &[];
    for (i, line) in lines.into_iter().enumerate() {
        if let Some(block) = node.prose.get(&i) {
            prose = block.as_slice();
        }
        let comment = function
            .as_ref()
            .map(|regex| function_comment(regex, language, &line.text, prose))
            .unwrap_or_default();

        match language.placement {
            Placement::Before => {
                out.extend(comment);
                out.push(line);
            }
            Placement::After => {
                out.push(line);
                out.extend(comment);
            }
        }
    }

    node.lines = out;
    Ok(())
}

/// Builds the comment for a function declaration line, empty if the line
/// isn't one or no prose line starts with the function's name.
fn function_comment(regex: &Regex, language: &Language, text: &str, prose: &[Line]) -> Vec<Line> {
    let Some(name) = regex.captures(text).and_then(|caps| caps.name("name")) else {
        return Vec::new();
    };
    let Some(start) = prose.iter().position(|line| line.text.starts_with(name.as_str())) else {
        return Vec::new();
    };
    let body = &prose[start..];

    let indent = &text[..text.len() - text.trim_start().len()];
    let prefix = format!("{}{}", indent, language.comment.indent);

    let mut out = Vec::with_capacity(body.len() + 2);
    match &language.comment.block {
        Some(block) => {
            if !block.open.is_empty() {
                out.push(Line::synthetic(format!("{}{}", prefix, block.open)));
            }
            for line in body {
                out.push(Line::comment(comment_line(&prefix, &block.during, &line.text), line.origin));
            }
            if !block.close.is_empty() {
                out.push(Line::synthetic(format!("{}{}", prefix, block.close)));
            }
        }
        None => {
            let Some(marker) = language.comment.line_prefix() else {
                return Vec::new();
            };
            for line in body {
                out.push(Line::comment(comment_line(&prefix, marker, &line.text), line.origin));
            }
        }
    }
    out
}

fn comment_line(prefix: &str, marker: &str, text: &str) -> String {
    if marker.is_empty() {
        format!("{}{}", prefix, text)
    } else {
        format!("{}{} {}", prefix, marker, text)
    }
}
