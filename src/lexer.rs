use crate::report::{Diagnostic, DiagnosticKind};

/// Defensive cap on the whole input. RFC 5646 grammar bounds a tag well
/// below this; anything longer is rejected before scanning.
pub(crate) const MAX_TAG_LEN: usize = 2048;

/// No subtag may exceed eight characters.
pub(crate) const MAX_SUBTAG_LEN: usize = 8;

/// One hyphen-delimited subtag and its byte offset in the original input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Token<'t> {
    pub text: &'t str,
    pub offset: usize,
}

/// Split `input` into subtag tokens, reporting the first structural fault in
/// textual order. The lexer checks only charset and length; classification
/// is the parser's job.
pub(crate) fn scan(input: &str) -> Result<Vec<Token<'_>>, Diagnostic> {
    if input.is_empty() {
        return Err(Diagnostic::new(DiagnosticKind::EmptyTag, "the input is empty").offset(0));
    }
    if input.len() > MAX_TAG_LEN {
        return Err(Diagnostic::new(
            DiagnosticKind::TagTooLong,
            format!(
                "the input is {len} bytes long, over the {MAX_TAG_LEN} byte limit",
                len = input.len()
            ),
        ));
    }

    let mut tokens = Vec::new();
    let mut offset = 0;
    for piece in input.split('-') {
        if piece.is_empty() {
            return Err(Diagnostic::new(
                DiagnosticKind::EmptySubtag,
                "subtags must not be empty",
            )
            .offset(offset));
        }
        if let Some(at) = piece
            .bytes()
            .position(|b| !b.is_ascii_alphanumeric())
        {
            let bad = &piece[at..at + piece[at..].chars().next().map_or(1, char::len_utf8)];
            return Err(Diagnostic::new(
                DiagnosticKind::InvalidCharacter,
                format!("character {bad:?} is outside [A-Za-z0-9-]"),
            )
            .subtag(bad)
            .offset(offset + at));
        }
        if piece.len() > MAX_SUBTAG_LEN {
            return Err(Diagnostic::new(
                DiagnosticKind::SubtagTooLong,
                format!(
                    "subtag {piece:?} is {len} characters long, over the {MAX_SUBTAG_LEN} character limit",
                    len = piece.len()
                ),
            )
            .subtag(piece)
            .offset(offset));
        }
        tokens.push(Token {
            text: piece,
            offset,
        });
        offset += piece.len() + 1;
    }
    Ok(tokens)
}
