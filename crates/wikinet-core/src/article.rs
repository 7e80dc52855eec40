//! Article (node) and similarity (edge) records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category value marking an article as low-value for display.
pub const REDUNDANT_CATEGORY: &str = "Redundant";

/// Unique identifier for an article.
///
/// Upstream exports use integer ids, hand-written fixtures use strings;
/// both deserialize into the same textual key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawArticleId")]
pub struct ArticleId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawArticleId {
    Int(i64),
    Text(String),
}

impl From<RawArticleId> for ArticleId {
    fn from(raw: RawArticleId) -> Self {
        match raw {
            RawArticleId::Int(i) => Self(i.to_string()),
            RawArticleId::Text(s) => Self(s),
        }
    }
}

impl ArticleId {
    /// Create a new article ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for ArticleId {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<u64> for ArticleId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&ArticleId> for ArticleId {
    fn from(id: &ArticleId) -> Self {
        id.clone()
    }
}

/// Popularity band of an article, from a quartile split of its view count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Popularity {
    /// Bottom quartile.
    Low,
    /// Second quartile.
    Medium,
    /// Third quartile.
    High,
    /// Top quartile.
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Popularity {
    /// All bands, lowest first.
    pub const ALL: [Popularity; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for Popularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Popularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "veryhigh" => Ok(Self::VeryHigh),
            _ => Err(format!("unknown popularity band: {s:?}")),
        }
    }
}

impl TryFrom<String> for Popularity {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// An article (node) in the similarity graph.
///
/// Every attribute besides the id is optional: the artifact is produced
/// upstream and a missing field must surface as an error where it is
/// needed rather than being defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier.
    pub id: ArticleId,

    /// Article title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Topic cluster label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Category label; [`REDUNDANT_CATEGORY`] marks prunable articles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Raw view count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,

    /// Popularity band, when supplied upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<Popularity>,

    /// Degree centrality over the full graph (computed upstream).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,

    /// Betweenness centrality over the full graph (computed upstream).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub betweenness: Option<f64>,

    /// Introductory paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    /// Full article text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Article {
    /// Create an article with just an ID.
    pub fn new(id: impl Into<ArticleId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            topic: None,
            category: None,
            views: None,
            popularity: None,
            degree: None,
            betweenness: None,
            intro: None,
            content: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the view count.
    pub fn with_views(mut self, views: u64) -> Self {
        self.views = Some(views);
        self
    }

    /// Set the popularity band.
    pub fn with_popularity(mut self, popularity: Popularity) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Set the global centrality scores.
    pub fn with_centrality(mut self, degree: f64, betweenness: f64) -> Self {
        self.degree = Some(degree);
        self.betweenness = Some(betweenness);
        self
    }

    /// Set the intro paragraph.
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    /// Set the full text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Title if present, otherwise the id.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }

    /// Whether the category is the redundancy sentinel.
    ///
    /// `None` when the category attribute is absent.
    pub fn is_redundant(&self) -> Option<bool> {
        self.category.as_deref().map(|c| c == REDUNDANT_CATEGORY)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref title) = self.title {
            write!(f, "{} ({})", title, self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

/// Similarity (edge) attributes between two articles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Similarity {
    /// Similarity score, typically in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Similarity {
    /// Weighted similarity.
    pub fn new(weight: f64) -> Self {
        Self {
            weight: Some(weight),
        }
    }

    /// Similarity edge carrying no weight attribute.
    pub fn unweighted() -> Self {
        Self { weight: None }
    }
}
