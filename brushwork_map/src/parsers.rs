use nom::{
    branch::alt,
    bytes::complete::{is_not, take_till},
    character::complete::{char, multispace0},
    combinator::{recognize, rest},
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};
use tracing::warn;

// quotes are kept, they are stripped when the token is stored
fn quoted_token(i: &str) -> IResult<&str, &str> {
    recognize(delimited(char('"'), take_till(|c| c == '"'), char('"')))(i)
}

// a quote that is never closed runs to the end of the line
fn unterminated_quoted_token(i: &str) -> IResult<&str, &str> {
    recognize(preceded(char('"'), rest))(i)
}

fn bare_token(i: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"")(i)
}

fn token(i: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        alt((quoted_token, unterminated_quoted_token, bare_token)),
    )(i)
}

/// Splits a line into whitespace separated tokens.
/// Whitespace inside double quotes doesn't split, and a quote always starts a new token.
pub(crate) fn tokenize(line: &str) -> Vec<&str> {
    many0(token)(line).map_or_else(|_| Vec::new(), |(_, tokens)| tokens)
}

/// Strips a pair of surrounding double quotes, if present.
pub(crate) fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}

/// Removes `//` comments, keeping the line breaks.
/// Quoted strings are not taken into account, so `//` inside a value starts a comment too.
pub(crate) fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        match line.find("//") {
            Some(start) => {
                result.push_str(&line[..start]);
                if line.ends_with('\n') {
                    result.push('\n');
                }
            }
            None => result.push_str(line),
        }
    }

    result
}

/// Returns the trimmed contents of every top level `{ }` block, skipping empty ones.
pub(crate) fn split_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut depth = 0_usize;
    let mut block_start = 0;

    for (i, c) in content.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    block_start = i + 1;
                }
                depth += 1;
            }
            '}' if depth == 0 => {
                warn!("ignoring unmatched `}}` at byte {}", i);
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let block = content[block_start..i].trim();
                    if !block.is_empty() {
                        blocks.push(block);
                    }
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        warn!("unterminated block starting at byte {}, ignoring it", block_start);
    }

    blocks
}

/// Collects the lines of a nested block whose opening brace has already been consumed.
/// `first` is the rest of the opening line. Stops at the brace that closes the block,
/// the closing brace itself is not included.
pub(crate) fn take_nested_block<'a>(
    first: &'a str,
    lines: &mut impl Iterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut block = Vec::new();
    let mut depth = 1_usize;

    for line in std::iter::once(first).chain(lines) {
        let mut end = None;

        for (i, c) in line.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }

        if let Some(end) = end {
            block.push(&line[..end]);
            return block;
        }

        block.push(line);
    }

    block
}
