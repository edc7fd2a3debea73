use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tweet – one row of the source table
// ---------------------------------------------------------------------------

fn nan() -> f64 {
    f64::NAN
}

/// A single post with its month bucket and the two scored metrics.
///
/// Field names follow the column headers of the exported table
/// (`Month`, `Sentiment`, `Subjectivity`, `RawTweet`). Missing fields do not
/// fail the load: text falls back to empty and metrics to NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(rename = "Month", default, deserialize_with = "lenient_string")]
    pub month: String,
    /// Polarity in `[-1, 1]`.
    #[serde(rename = "Sentiment", default = "nan", deserialize_with = "lenient_f64")]
    pub sentiment: f64,
    /// Subjectivity in `[0, 1]`.
    #[serde(rename = "Subjectivity", default = "nan", deserialize_with = "lenient_f64")]
    pub subjectivity: f64,
    #[serde(rename = "RawTweet", default, deserialize_with = "lenient_string")]
    pub raw_tweet: String,
}

/// Accept numbers, numeric strings and nulls; anything else becomes NaN.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) => v,
        Some(Raw::Text(s)) => s.trim().parse().unwrap_or(f64::NAN),
        Some(Raw::Other(_)) | None => f64::NAN,
    })
}

/// Keep text, print scalars, and turn nulls or nested values into "".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Integer(i)) => i.to_string(),
        Some(Raw::Float(f)) => f.to_string(),
        Some(Raw::Bool(b)) => b.to_string(),
        Some(Raw::Other(_)) | None => String::new(),
    })
}

impl Tweet {
    pub fn new(month: &str, sentiment: f64, subjectivity: f64, raw_tweet: &str) -> Self {
        Tweet {
            month: month.to_string(),
            sentiment,
            subjectivity,
            raw_tweet: raw_tweet.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// TweetDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All loaded tweets plus the month categories in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TweetDataset {
    pub tweets: Vec<Tweet>,
    /// Distinct months in the order they first appear.
    pub months: Vec<String>,
}

impl TweetDataset {
    /// Keep at most `limit` tweets and index their months.
    pub fn from_tweets(mut tweets: Vec<Tweet>, limit: usize) -> Self {
        tweets.truncate(limit);
        let months = first_seen_months(&tweets);
        TweetDataset { tweets, months }
    }

    /// Number of tweets.
    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// Band index of a month, if present.
    pub fn month_index(&self, month: &str) -> Option<usize> {
        self.months.iter().position(|m| m == month)
    }
}

fn first_seen_months(tweets: &[Tweet]) -> Vec<String> {
    let mut seen = HashSet::new();
    tweets
        .iter()
        .filter(|t| seen.insert(t.month.as_str()))
        .map(|t| t.month.clone())
        .collect()
}
