#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// The token name when the whole string is exactly one placeholder.
    pub fn sole_token(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [Segment::Token(name)] => Some(name),
            _ => None,
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Token(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// Split a string into literal text and `{{name}}` placeholders.
///
/// An unclosed `{{` or an empty `{{ }}` is kept as literal text; config strings routinely carry
/// braces of their own.
pub fn parse_template(input: &str) -> Template {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..end].trim();
        buf.push_str(&rest[..start]);
        if name.is_empty() {
            buf.push_str(&rest[start..start + 2 + end + 2]);
        } else {
            if !buf.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut buf)));
            }
            segments.push(Segment::Token(name.to_string()));
        }
        rest = &after_open[end + 2..];
    }

    buf.push_str(rest);
    if !buf.is_empty() {
        segments.push(Segment::Literal(buf));
    }

    Template { segments }
}
