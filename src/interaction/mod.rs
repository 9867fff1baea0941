//! Widget handlers for the clinic portal.
//!
//! Each widget turns one user action into a renderable view:
//! - Quick stats, medicine and doctor lookups
//! - The triage catbot (text and voice) and the emergency button
//! - Sign-in, report upload, and the contact form
//!
//! Every backend call goes through [`attempt`], which swaps in demo content on failure.

pub mod catbot;
pub mod contact;
pub mod doctors;
pub mod emergency;
pub mod medicine;
pub mod portal;
pub mod stats;

use std::fmt;

use tracing::warn;

use crate::base::types::Res;

// Fallback.

/// A view, tagged with where its content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    /// Rendered from a backend response.
    Live(V),
    /// Static demo content shown because the backend call failed.
    Demo(V),
}

impl<V> Outcome<V> {
    pub fn view(&self) -> &V {
        match self {
            Outcome::Live(v) | Outcome::Demo(v) => v,
        }
    }

    pub fn into_view(self) -> V {
        match self {
            Outcome::Live(v) | Outcome::Demo(v) => v,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Outcome::Demo(_))
    }
}

impl<V: fmt::Display> fmt::Display for Outcome<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view().fmt(f)
    }
}

/// Run a backend call, rendering its result, or the fallback if it fails for any reason.
///
/// Failures are logged and never retried.
pub async fn attempt<T, V, F>(what: &str, call: F, render: impl FnOnce(T) -> V, fallback: impl FnOnce() -> V) -> Outcome<V>
where
    F: Future<Output = Res<T>>,
{
    match call.await {
        Ok(value) => Outcome::Live(render(value)),
        Err(err) => {
            warn!("{} unavailable, showing demo content: {:#}", what, err);
            Outcome::Demo(fallback())
        }
    }
}

// Views.

/// How a notice is emphasised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Pending,
    Success,
    Warning,
    Error,
    Alert,
}

/// A one-line status or validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
}

impl Notice {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Error)
    }

    pub fn pending(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Pending)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Warning)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    pub muted: bool,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), muted: false }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self { text: text.into(), muted: true }
    }
}

/// A rendered list of rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing(pub Vec<ListItem>);

impl Listing {
    pub fn items(&self) -> &[ListItem] {
        &self.0
    }

    pub fn texts(&self) -> Vec<&str> {
        self.0.iter().map(|i| i.text.as_str()).collect()
    }

    /// Rows from static lines, closed with a muted note.
    pub fn demo(lines: &[&str], note: &str) -> Self {
        let mut items: Vec<_> = lines.iter().map(|l| ListItem::new(*l)).collect();
        items.push(ListItem::muted(note));

        Self(items)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            if item.muted {
                write!(f, "  {}", item.text)?;
            } else {
                write!(f, "• {}", item.text)?;
            }
        }

        Ok(())
    }
}
