//! Bracket notation parser
//!
//! Tokenizes bracketed text with a pest grammar and builds a [`Tree`] with a
//! stack. The builder is lenient: a `)` with nothing open is counted and
//! skipped, and brackets left open at the end are closed implicitly.

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::tree::{NodeId, Tree};

#[derive(Parser)]
#[grammar = "bracket.pest"]
struct BracketParser;

/// Error type for bracket parsing failures
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Bracket parse error: {0}")]
    Syntax(#[from] pest::error::Error<Rule>),
}

/// Parse bracketed text into a tree, repairing unbalanced brackets
pub fn parse_bracketed(input: &str) -> Result<Tree, ParseError> {
    let mut pairs = BracketParser::parse(Rule::fragment, input)?;
    let mut tree = Tree::new();
    let mut open: Vec<NodeId> = Vec::new();

    let Some(fragment) = pairs.next() else {
        return Ok(tree);
    };

    for token in fragment.into_inner() {
        match token.as_rule() {
            Rule::open => {
                let label = token.into_inner().next().map_or("", |l| l.as_str());
                let id = tree.add_node(label, open.last().copied());
                open.push(id);
            }
            Rule::close => {
                if open.pop().is_none() {
                    tree.unmatched_closes += 1;
                }
            }
            Rule::word => tree.add_word(token.as_str(), open.last().copied()),
            _ => {} // EOI
        }
    }

    tree.unclosed = open.len();
    Ok(tree)
}
