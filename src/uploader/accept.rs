use super::FileLike;

/// Parsed `accept` attribute: MIME types and `.extension` tokens, matched
/// verbatim (no `image/*` wildcards).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    tokens: Vec<String>,
}

impl AcceptFilter {
    /// `None` when the attribute holds no usable token.
    pub fn parse(accept: &str) -> Option<Self> {
        let tokens: Vec<String> = accept
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    pub fn matches<F: FileLike + ?Sized>(&self, file: &F) -> bool {
        let mime = file.mime_type();
        let name = file.name();
        let extension = name.rfind('.').map(|dot| &name[dot..]);

        self.tokens
            .iter()
            .any(|token| *token == mime || Some(token.as_str()) == extension)
    }
}
