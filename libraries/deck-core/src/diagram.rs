//! Diagram rendering seam
//!
//! Rendering itself is delegated to a [`DiagramRenderer`]. This module owns the
//! two pieces hosts share: collision-free render ids and the raw-text
//! fallback used when a render fails.

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Identifier handed to a renderer for one diagram
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RenderId(String);

impl RenderId {
    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic render id source owned by the caller
///
/// Two generators with different prefixes never collide, and no state is
/// shared between them.
#[derive(Debug, Clone)]
pub struct RenderIdGenerator {
    prefix: String,
    next: u64,
}

impl RenderIdGenerator {
    /// Create a generator producing `<prefix>-0`, `<prefix>-1`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Next unused id
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> RenderId {
        let id = RenderId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl Default for RenderIdGenerator {
    fn default() -> Self {
        Self::new("diagram")
    }
}

/// Converts diagram source text into markup
pub trait DiagramRenderer {
    /// Renderer-specific failure
    type Error: fmt::Display;

    /// Render `source` using `id` as the element id
    fn render(&mut self, id: &RenderId, source: &str) -> Result<String, Self::Error>;
}

/// Output of one render attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDiagram {
    /// Id the render was issued under
    pub id: RenderId,
    /// Rendered markup, or the escaped source in a `<pre>` block
    pub markup: String,
    /// True when the renderer failed
    pub fell_back: bool,
}

/// Render a diagram, degrading to its escaped source on failure
pub fn render_or_fallback<R: DiagramRenderer>(
    renderer: &mut R,
    ids: &mut RenderIdGenerator,
    source: &str,
) -> RenderedDiagram {
    let id = ids.next();
    match renderer.render(&id, source) {
        Ok(markup) => RenderedDiagram {
            id,
            markup,
            fell_back: false,
        },
        Err(e) => {
            warn!(id = %id, error = %e, "Diagram render failed, showing source");
            RenderedDiagram {
                markup: fallback_markup(source),
                id,
                fell_back: true,
            }
        }
    }
}

/// `<pre>` block containing the HTML-escaped source
pub fn fallback_markup(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 11);
    out.push_str("<pre>");
    for c in source.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out.push_str("</pre>");
    out
}
